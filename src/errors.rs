use thiserror::Error;

/// Where a backend interaction broke down
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStage {
    /// No project URL was configured
    Configuration,
    /// HTTP request could not be sent or completed
    Transport,
    /// Server answered with a non-success status
    Status,
    /// Body did not decode into the expected rows
    Decode,
    /// Realtime websocket connect/join
    Realtime,
}

impl std::fmt::Display for BackendStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl BackendStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendStage::Configuration => "Configuration",
            BackendStage::Transport => "Transport",
            BackendStage::Status => "HTTP Status",
            BackendStage::Decode => "Response Decoding",
            BackendStage::Realtime => "Realtime Subscription",
        }
    }
}

/// Failures talking to the hosted data service.
///
/// None of these reach the user: reads fall back to the bundled catalog and
/// realtime failures just leave the current data in place.
#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("backend URL is not configured")]
    NotConfigured,

    #[error("request to {0} failed: {1}")]
    Transport(String, String),

    #[error("server returned {0}: {1}")]
    Status(u16, String),

    #[error("failed to decode {0} rows: {1}")]
    Decode(String, String),

    #[error("realtime subscription failed: {0}")]
    Realtime(String),
}

impl BackendError {
    pub fn stage(&self) -> BackendStage {
        match self {
            BackendError::NotConfigured => BackendStage::Configuration,
            BackendError::Transport(..) => BackendStage::Transport,
            BackendError::Status(..) => BackendStage::Status,
            BackendError::Decode(..) => BackendStage::Decode,
            BackendError::Realtime(_) => BackendStage::Realtime,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for BackendError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        BackendError::Realtime(e.to_string())
    }
}
