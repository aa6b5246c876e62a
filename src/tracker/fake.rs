use crate::model::{Cycle, Record, RecordId, ReportError, Result, Unit};
use crate::tracker::TrackerClient;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory tracker with per-id failure injection, used by fetcher,
/// verifier, and pipeline tests.
pub struct FakeTracker {
    cycles: Vec<Cycle>,
    records: HashMap<RecordId, Record>,
    cycle_records: HashMap<String, Vec<RecordId>>,
    remaining_failures: Mutex<HashMap<RecordId, usize>>,
    pub fetch_calls: Mutex<Vec<RecordId>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            cycles: Vec::new(),
            records: HashMap::new(),
            cycle_records: HashMap::new(),
            remaining_failures: Mutex::new(HashMap::new()),
            fetch_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_cycle(mut self, cycle: Cycle) -> Self {
        self.cycle_records.entry(cycle.id.clone()).or_default();
        self.cycles.push(cycle);
        self
    }

    pub fn with_record(mut self, cycle_id: &str, record: Record) -> Self {
        self.cycle_records
            .entry(cycle_id.to_string())
            .or_default()
            .push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        self
    }

    /// The next `count` fetches of `id` fail before succeeding.
    pub fn failing_times(self, id: &str, count: usize) -> Self {
        self.remaining_failures
            .lock()
            .unwrap()
            .insert(id.to_string(), count);
        self
    }
}

impl TrackerClient for FakeTracker {
    async fn list_cycles(&self, _unit: &Unit) -> Result<Vec<Cycle>> {
        Ok(self.cycles.clone())
    }

    async fn list_record_ids(&self, _unit: &Unit, cycle_id: &str) -> Result<Vec<RecordId>> {
        Ok(self
            .cycle_records
            .get(cycle_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_record(&self, id: &RecordId) -> Result<Record> {
        self.fetch_calls.lock().unwrap().push(id.clone());
        let mut failures = self.remaining_failures.lock().unwrap();
        if let Some(remaining) = failures.get_mut(id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ReportError::Payload(format!("injected failure for `{id}`")));
            }
        }
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| ReportError::Payload(format!("unknown record `{id}`")))
    }
}
