use beingtv_lib::config;

fn main() {
    match (config::config_path(), config::data_dir()) {
        (Some(config_file), Some(data_dir)) => {
            println!("Config file: {:?}", config_file);
            println!("Preferences: {:?}", data_dir.join("preferences.json"));
            println!("Log file:    {:?}", data_dir.join("beingtv.log"));
        }
        _ => println!("Could not determine project paths"),
    }
}
