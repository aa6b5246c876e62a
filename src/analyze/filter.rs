use crate::model::{FilteredRecord, MatchedEvent, Record, ReportWindow};
use chrono::Utc;

/// Keeps only records with at least one event inside the window and
/// annotates them with those events. Cycle membership alone never
/// qualifies; a record whose whole history falls outside the window is
/// dropped. Timestamps are normalized to UTC before the date comparison.
pub fn filter_records(records: &[Record], window: &ReportWindow) -> Vec<FilteredRecord> {
    records
        .iter()
        .filter_map(|record| {
            let matched_events = record
                .change_events
                .iter()
                .cloned()
                .map(MatchedEvent::Change)
                .chain(record.comments.iter().cloned().map(MatchedEvent::Comment))
                .filter(|event| {
                    window.contains(event.timestamp().with_timezone(&Utc).date_naive())
                })
                .collect::<Vec<_>>();
            if matched_events.is_empty() {
                None
            } else {
                Some(FilteredRecord {
                    record: record.clone(),
                    matched_events,
                })
            }
        })
        .collect()
}
