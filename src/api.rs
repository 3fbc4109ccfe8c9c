use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::BackendError;

/// Canonical "unset" stream value used by the data service
pub const NO_STREAM: &str = "#";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub stream_url: Option<String>,
}

impl Channel {
    pub fn has_stream(&self) -> bool {
        is_playable(self.stream_url.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub team1_name: String,
    #[serde(default)]
    pub team1_logo: String,
    #[serde(default)]
    pub team2_name: String,
    #[serde(default)]
    pub team2_logo: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tournament: String,
    #[serde(default)]
    pub commentator: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub stream_url: Option<String>,

    // Localized variants
    #[serde(default)]
    pub status_ar: Option<String>,
    #[serde(default)]
    pub tournament_ar: Option<String>,
    #[serde(default)]
    pub commentator_ar: Option<String>,
    #[serde(default)]
    pub team1_name_ar: Option<String>,
    #[serde(default)]
    pub team2_name_ar: Option<String>,
}

fn localized<'a>(variant: &'a Option<String>, base: &'a str) -> &'a str {
    match variant.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => base,
    }
}

impl Match {
    pub fn display_team1(&self) -> &str {
        localized(&self.team1_name_ar, &self.team1_name)
    }

    pub fn display_team2(&self) -> &str {
        localized(&self.team2_name_ar, &self.team2_name)
    }

    pub fn display_status(&self) -> &str {
        localized(&self.status_ar, &self.status)
    }

    pub fn display_tournament(&self) -> &str {
        localized(&self.tournament_ar, &self.tournament)
    }

    pub fn display_commentator(&self) -> &str {
        localized(&self.commentator_ar, &self.commentator)
    }

    pub fn is_live(&self) -> bool {
        self.status == "LIVE"
    }
}

/// True when `url` names something the player can open
pub fn is_playable(url: Option<&str>) -> bool {
    matches!(url, Some(u) if !u.trim().is_empty() && u != NO_STREAM)
}

/// Remote tables read by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Categories,
    Channels,
    Matches,
}

impl Table {
    pub fn all() -> &'static [Table] {
        &[Table::Categories, Table::Channels, Table::Matches]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Table::Categories => "categories",
            Table::Channels => "channels",
            Table::Matches => "matches",
        }
    }

    /// Matches come back in storage order
    pub fn order_column(&self) -> Option<&'static str> {
        match self {
            Table::Categories | Table::Channels => Some("name"),
            Table::Matches => None,
        }
    }
}

/// Thin PostgREST client for the hosted project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    pub base_url: String,
    pub anon_key: String,
    client: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .user_agent(concat!("beingtv/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url,
            anon_key,
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    pub fn table_url(&self, table: Table) -> String {
        match table.order_column() {
            Some(col) => format!("{}/rest/v1/{}?select=*&order={}.asc", self.base_url, table.name(), col),
            None => format!("{}/rest/v1/{}?select=*", self.base_url, table.name()),
        }
    }

    /// `select * from <table> [order by name]`
    pub async fn select_all<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>, BackendError> {
        if !self.is_configured() {
            return Err(BackendError::NotConfigured);
        }

        let url = self.table_url(table);
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| BackendError::Transport(table.name().to_string(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status(status.as_u16(), body));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::Transport(table.name().to_string(), e.to_string()))?;
        decode_rows(table, &text)
    }
}

/// Decode a PostgREST JSON array; unknown columns are ignored
pub fn decode_rows<T: DeserializeOwned>(table: Table, body: &str) -> Result<Vec<T>, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Decode(table.name().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_urls() {
        let client = SupabaseClient::new("https://demo.supabase.co/".into(), "k".into());
        assert_eq!(
            client.table_url(Table::Channels),
            "https://demo.supabase.co/rest/v1/channels?select=*&order=name.asc"
        );
        assert_eq!(
            client.table_url(Table::Matches),
            "https://demo.supabase.co/rest/v1/matches?select=*"
        );
    }

    #[test]
    fn test_decode_ignores_extra_columns() {
        let body = r#"[{"id":"c1","name":"Sport 1","logo":"l","category_id":"x","created_at":"2024-01-01","stream_url":null}]"#;
        let rows: Vec<Channel> = decode_rows(Table::Channels, body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stream_url, None);
        assert!(!rows[0].has_stream());
    }

    #[test]
    fn test_decode_error_is_classified() {
        let err = decode_rows::<Category>(Table::Categories, "{not json").unwrap_err();
        assert!(matches!(err, BackendError::Decode(ref t, _) if t == "categories"));
    }

    #[test]
    fn test_match_prefers_localized_fields() {
        let m = Match {
            team1_name: "Sunderland".into(),
            team1_name_ar: Some("سندرلاند".into()),
            status: "LIVE".into(),
            status_ar: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(m.display_team1(), "سندرلاند");
        assert_eq!(m.display_status(), "LIVE");
        assert!(m.is_live());
    }

    #[test]
    fn test_is_playable() {
        assert!(!is_playable(None));
        assert!(!is_playable(Some("")));
        assert!(!is_playable(Some("#")));
        assert!(is_playable(Some("https://cdn.example/live.m3u8")));
    }

    #[tokio::test]
    async fn test_unconfigured_client_errors() {
        let client = SupabaseClient::new(String::new(), String::new());
        let res = client.select_all::<Category>(Table::Categories).await;
        assert!(matches!(res, Err(BackendError::NotConfigured)));
    }
}
