use crate::model::{Cycle, Record, RecordId, Result, Unit};
use crate::tracker::client::{parse_cycles, parse_record, parse_record_ids};
use crate::tracker::{TrackerClient, COMMENT_LIMIT};
use serde_json::Value;

/// Tracker access over its REST API, bearer-token auth.
pub struct HttpTracker {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpTracker {
    pub fn new(base_url: impl ToString, token: impl ToString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

impl TrackerClient for HttpTracker {
    async fn list_cycles(&self, unit: &Unit) -> Result<Vec<Cycle>> {
        let payload = self
            .get_json(&format!(
                "teams/{}/boards/{}/cycles",
                unit.team_id, unit.board_id
            ))
            .await?;
        parse_cycles(&payload)
    }

    async fn list_record_ids(&self, unit: &Unit, cycle_id: &str) -> Result<Vec<RecordId>> {
        // The component narrowing happens here, never downstream.
        let path = match &unit.component {
            Some(component) => format!("cycles/{cycle_id}/issues?component={component}"),
            None => format!("cycles/{cycle_id}/issues"),
        };
        let payload = self.get_json(&path).await?;
        parse_record_ids(&payload)
    }

    async fn fetch_record(&self, id: &RecordId) -> Result<Record> {
        let payload = self
            .get_json(&format!(
                "issues/{id}?include=history,comments&comment_limit={COMMENT_LIMIT}"
            ))
            .await?;
        parse_record(&payload)
    }
}
