use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no cycle overlaps the window {start}..{end}")]
    NoCycleFound {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("cycles [{}] tie for maximum window overlap", .0.join(", "))]
    AmbiguousCycle(Vec<String>),

    #[error("config error: {0}")]
    Config(String),

    #[error("tracker request failed: {0}")]
    Tracker(#[from] reqwest::Error),

    #[error("malformed tracker payload: {0}")]
    Payload(String),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("persistence failed for `{id}`: {source}")]
    Persistence {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
