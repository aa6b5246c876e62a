use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type RecordId = String;

/// A fully-fetched work item. `change_events` carries no serde default on
/// purpose: a stored payload without a history container must fail to
/// deserialize so the verifier treats it as missing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub state: String,
    pub change_events: Vec<ChangeEvent>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub timestamp: DateTime<FixedOffset>,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub author: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub timestamp: DateTime<FixedOffset>,
    pub author: String,
    pub body: String,
}
