//! Data access with a bundled fallback.
//!
//! Every read returns *something*: a failed or empty remote query is replaced
//! by the fixed dataset below. Callers cannot tell the two apart.

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::api::{Category, Channel, Match, SupabaseClient, Table, NO_STREAM};
use crate::errors::BackendError;

const BEIN_LOGO: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/6/6b/BeIN_Sports_logo.svg/2560px-BeIN_Sports_logo.svg.png";

pub static FALLBACK_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    [
        ("bein-1080", "beIN SPORTS (1080P)"),
        ("bein-720", "beIN SPORTS (720P)"),
        ("bein-480", "beIN SPORTS (480P)"),
        ("bein-ent", "beIN ENTERTAINMENT"),
        ("arabic", "ARABIC CHANNELS"),
        ("kids", "KIDS CHANNELS"),
    ]
    .iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
});

pub static FALLBACK_CHANNELS: Lazy<Vec<Channel>> = Lazy::new(|| {
    let mut channels = vec![Channel {
        id: "bn-news".to_string(),
        name: "beIN News".to_string(),
        logo: BEIN_LOGO.to_string(),
        category_id: "bein-720".to_string(),
        stream_url: Some(NO_STREAM.to_string()),
    }];
    channels.extend((1..=9).map(|n| Channel {
        id: format!("bn-{}", n),
        name: format!("beIN Sport {}", n),
        logo: BEIN_LOGO.to_string(),
        category_id: "bein-720".to_string(),
        stream_url: Some(NO_STREAM.to_string()),
    }));
    channels
});

pub static FALLBACK_MATCHES: Lazy<Vec<Match>> = Lazy::new(|| {
    vec![Match {
        id: "m1".to_string(),
        team1_name: "Sunderland".to_string(),
        team1_logo: "https://upload.wikimedia.org/wikipedia/en/thumb/7/77/Sunderland_AFC_logo.svg/1200px-Sunderland_AFC_logo.svg.png".to_string(),
        team2_name: "Man City".to_string(),
        team2_logo: "https://upload.wikimedia.org/wikipedia/en/thumb/e/eb/Manchester_City_FC_badge.svg/1200px-Manchester_City_FC_badge.svg.png".to_string(),
        status: "LIVE".to_string(),
        tournament: "Premier League".to_string(),
        commentator: "Hassan Al-Eidaroos".to_string(),
        channel_name: "beIN Sport 1".to_string(),
        stream_url: Some(NO_STREAM.to_string()),
        ..Default::default()
    }]
});

/// Binary success-or-fallback: errors and empty results both yield `fallback`
pub fn with_fallback<T: Clone>(table: Table, result: Result<Vec<T>, BackendError>, fallback: &[T]) -> Vec<T> {
    match result {
        Ok(rows) if !rows.is_empty() => {
            debug!("Loaded {} rows from {}", rows.len(), table.name());
            rows
        }
        Ok(_) => {
            warn!("Remote table {} is empty, using bundled data", table.name());
            fallback.to_vec()
        }
        Err(e) => {
            warn!("Reading {} failed at {}: {}; using bundled data", table.name(), e.stage(), e);
            fallback.to_vec()
        }
    }
}

pub async fn fetch_categories(client: &SupabaseClient) -> Vec<Category> {
    let res = client.select_all(Table::Categories).await;
    with_fallback(Table::Categories, res, &FALLBACK_CATEGORIES)
}

pub async fn fetch_channels(client: &SupabaseClient) -> Vec<Channel> {
    let res = client.select_all(Table::Channels).await;
    with_fallback(Table::Channels, res, &FALLBACK_CHANNELS)
}

pub async fn fetch_matches(client: &SupabaseClient) -> Vec<Match> {
    let res = client.select_all(Table::Matches).await;
    with_fallback(Table::Matches, res, &FALLBACK_MATCHES)
}

/// The three collections, always replaced together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub channels: Vec<Channel>,
    pub matches: Vec<Match>,
}

impl CatalogSnapshot {
    pub fn fallback() -> Self {
        Self {
            categories: FALLBACK_CATEGORIES.to_vec(),
            channels: FALLBACK_CHANNELS.to_vec(),
            matches: FALLBACK_MATCHES.to_vec(),
        }
    }
}

/// Runs the three reads concurrently
pub async fn fetch_all(client: &SupabaseClient) -> CatalogSnapshot {
    let (categories, channels, matches) = tokio::join!(
        fetch_categories(client),
        fetch_channels(client),
        fetch_matches(client)
    );
    CatalogSnapshot {
        categories,
        channels,
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_sizes() {
        assert_eq!(FALLBACK_CATEGORIES.len(), 6);
        assert_eq!(FALLBACK_CHANNELS.len(), 10);
        assert_eq!(FALLBACK_MATCHES.len(), 1);
        assert!(FALLBACK_CHANNELS.iter().all(|c| c.category_id == "bein-720"));
    }

    #[test]
    fn test_error_yields_fallback() {
        let res: Result<Vec<Category>, _> = Err(BackendError::Status(500, "boom".into()));
        assert_eq!(with_fallback(Table::Categories, res, &FALLBACK_CATEGORIES), *FALLBACK_CATEGORIES);

        let res: Result<Vec<Channel>, _> = Err(BackendError::Transport("channels".into(), "refused".into()));
        assert_eq!(with_fallback(Table::Channels, res, &FALLBACK_CHANNELS), *FALLBACK_CHANNELS);

        let res: Result<Vec<Match>, _> = Err(BackendError::NotConfigured);
        assert_eq!(with_fallback(Table::Matches, res, &FALLBACK_MATCHES), *FALLBACK_MATCHES);
    }

    #[test]
    fn test_empty_yields_fallback() {
        let res: Result<Vec<Match>, BackendError> = Ok(vec![]);
        let rows = with_fallback(Table::Matches, res, &FALLBACK_MATCHES);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "m1");
    }

    #[test]
    fn test_live_rows_pass_through() {
        let live = vec![Category {
            id: "live".into(),
            name: "Live".into(),
        }];
        let rows = with_fallback(Table::Categories, Ok(live.clone()), &FALLBACK_CATEGORIES);
        assert_eq!(rows, live);
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable_backend() {
        // Nothing listens on port 1
        let client = SupabaseClient::new("http://127.0.0.1:1".into(), "anon".into());
        let snapshot = fetch_all(&client).await;
        assert_eq!(snapshot, CatalogSnapshot::fallback());
    }
}
