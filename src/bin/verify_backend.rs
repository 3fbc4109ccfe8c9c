use beingtv_lib::api::{Category, Channel, Match, SupabaseClient, Table};
use beingtv_lib::config::AppConfig;

async fn report<T: serde::de::DeserializeOwned>(client: &SupabaseClient, table: Table) -> bool {
    match client.select_all::<T>(table).await {
        Ok(rows) => {
            println!("  {:<11} ok, {} rows", table.name(), rows.len());
            true
        }
        Err(e) => {
            println!("  {:<11} FAILED at {}: {}", table.name(), e.stage(), e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = AppConfig::load()?;
    if !config.is_backend_configured() {
        println!("No backend configured. Set supabase_url and supabase_anon_key in the config file.");
        return Ok(());
    }

    let client = SupabaseClient::new(config.supabase_url.clone(), config.supabase_anon_key.clone());
    println!("Querying {}", config.supabase_url);

    let mut all_ok = report::<Category>(&client, Table::Categories).await;
    all_ok &= report::<Channel>(&client, Table::Channels).await;
    all_ok &= report::<Match>(&client, Table::Matches).await;

    if !all_ok {
        anyhow::bail!("one or more tables could not be read");
    }
    println!("Backend OK");
    Ok(())
}
