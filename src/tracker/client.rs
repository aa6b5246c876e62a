use crate::model::{ChangeEvent, Comment, Cycle, Record, RecordId, ReportError, Result, Unit};
use chrono::DateTime;
use serde_json::Value;

/// Comment cap requested per record. Generous on purpose: the activity
/// filter needs the full history, truncation below this is not silent.
pub const COMMENT_LIMIT: usize = 250;

/// Read-only view of the upstream issue tracker. The pipeline never
/// mutates tracker state through this seam.
pub trait TrackerClient {
    async fn list_cycles(&self, unit: &Unit) -> Result<Vec<Cycle>>;
    async fn list_record_ids(&self, unit: &Unit, cycle_id: &str) -> Result<Vec<RecordId>>;
    async fn fetch_record(&self, id: &RecordId) -> Result<Record>;
}

// Payload parsers, shared by the HTTP client and its tests.

pub(crate) fn parse_cycles(payload: &Value) -> Result<Vec<Cycle>> {
    let Some(elements) = payload["cycles"].as_array() else {
        return Err(ReportError::Payload("Not found 'cycles' array".to_string()));
    };
    let mut result = Vec::new();
    for details in elements {
        let id = require_str(details, "id")?;
        let name = require_str(details, "name")?;
        let start_date = require_date(details, "startDate")?;
        let end_date = require_date(details, "endDate")?;
        result.push(Cycle::new(id, name, start_date, end_date));
    }
    Ok(result)
}

pub(crate) fn parse_record_ids(payload: &Value) -> Result<Vec<RecordId>> {
    let Some(elements) = payload["issues"].as_array() else {
        return Err(ReportError::Payload("Not found 'issues' array".to_string()));
    };
    let mut result = Vec::new();
    for details in elements {
        result.push(require_str(details, "id")?.to_string());
    }
    Ok(result)
}

pub(crate) fn parse_record(payload: &Value) -> Result<Record> {
    let id = require_str(payload, "id")?.to_string();
    let title = require_str(payload, "title")?.to_string();
    let state = require_str(payload, "state")?.to_string();

    let Some(history) = payload["history"].as_array() else {
        return Err(ReportError::Payload(format!(
            "Not found 'history' array for `{id}`"
        )));
    };
    let mut change_events = Vec::new();
    for details in history {
        change_events.push(ChangeEvent {
            timestamp: require_timestamp(details, "timestamp")?,
            field: require_str(details, "field")?.to_string(),
            old_value: details["oldValue"].as_str().map(String::from),
            new_value: details["newValue"].as_str().map(String::from),
            author: require_str(details, "author")?.to_string(),
        });
    }

    let mut comments = Vec::new();
    if let Some(elements) = payload["comments"].as_array() {
        for details in elements {
            comments.push(Comment {
                timestamp: require_timestamp(details, "timestamp")?,
                author: require_str(details, "author")?.to_string(),
                body: require_str(details, "body")?.to_string(),
            });
        }
    }

    Ok(Record {
        id,
        title,
        state,
        change_events,
        comments,
    })
}

fn require_str<'a>(details: &'a Value, field: &str) -> Result<&'a str> {
    let Some(value) = details[field].as_str() else {
        return Err(ReportError::Payload(format!("Not found '{field}' field")));
    };
    Ok(value)
}

fn require_date(details: &Value, field: &str) -> Result<chrono::NaiveDate> {
    let raw = require_str(details, field)?;
    raw.parse()
        .map_err(|_| ReportError::Payload(format!("Not a valid date: {raw}")))
}

fn require_timestamp(details: &Value, field: &str) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    let raw = require_str(details, field)?;
    DateTime::parse_from_rfc3339(raw)
        .map_err(|_| ReportError::Payload(format!("Not a valid date time: {raw}")))
}
