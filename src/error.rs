use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuerierError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote API error: {0}")]
    RemoteApi(String),

    #[error("All endpoints exhausted, last error: {last}")]
    AllEndpointsExhausted { last: Box<QuerierError> },

    #[error("Unsupported intent: {0}")]
    UnsupportedIntent(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuerierError {
    /// True for failures the failover client recovers from by moving to the
    /// next endpoint. Everything else propagates unchanged.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuerierError::Transport(_) | QuerierError::RemoteApi(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QuerierError>;
