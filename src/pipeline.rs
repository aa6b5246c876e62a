use crate::analyze::{aggregate, filter_records};
use crate::fetch::{fetch_all, verify, BatchOutcome};
use crate::model::{CycleMatch, Record, Report, ReportWindow, Result, Unit};
use crate::report::assemble;
use crate::store::RecordStore;
use crate::tracker::TrackerClient;
use crate::utils::{MultiProgressNew, ProgressStyleTemplate};
use indicatif::{MultiProgress, ProgressBar};

/// After the initial fetch, at most this many verify/re-fetch rounds.
/// Ids still missing afterwards are reported as a gap, not an error.
pub const MAX_VERIFY_ROUNDS: usize = 3;

/// The single entry point: discover the cycle, fetch and persist its
/// records, verify completeness, then filter, aggregate, and assemble.
/// Only cycle discovery failure aborts; fetch-level failure is absorbed
/// into the report's missing-id set.
pub async fn run<T, S>(
    unit: &Unit,
    window: ReportWindow,
    batch_size: usize,
    tracker: &T,
    store: &S,
    progress: &MultiProgress,
) -> Result<Report>
where
    T: TrackerClient,
    S: RecordStore,
{
    let cycles_pb = progress.add_with_style(
        ProgressBar::no_length(),
        ProgressStyleTemplate::only_message(),
    );
    cycles_pb.set_message("Discovering cycle ...");
    let cycles = tracker.list_cycles(unit).await?;
    let cycle = cycles.match_window(&window)?.clone();
    cycles_pb.finish_with_message(format!(
        "✅ Matched cycle `{}` ({} - {})",
        cycle.name, cycle.start_date, cycle.end_date
    ));

    let ids = tracker.list_record_ids(unit, &cycle.id).await?;

    let fetch_pb = progress.add_with_style(
        ProgressBar::new(ids.len() as u64),
        ProgressStyleTemplate::number_bar(),
    );
    fetch_pb.set_message("Fetching");
    let outcome: BatchOutcome = fetch_all(tracker, store, &ids, batch_size, &fetch_pb).await;
    fetch_pb.finish_with_message(format!(
        "✅ Fetched {} of {} records",
        outcome.succeeded.len(),
        ids.len()
    ));

    let mut missing = verify(&ids, store).await;
    for round in 0..MAX_VERIFY_ROUNDS {
        if missing.is_empty() {
            break;
        }
        let retry_pb = progress.add_with_style(
            ProgressBar::new(missing.len() as u64),
            ProgressStyleTemplate::number_bar(),
        );
        retry_pb.set_message(format!("Retry #{}", round + 1));
        fetch_all(tracker, store, &missing, batch_size, &retry_pb).await;
        retry_pb.finish();
        missing = verify(&ids, store).await;
    }

    let mut fetched: Vec<Record> = Vec::new();
    for id in &ids {
        if let Some(record) = store.get(id).await? {
            fetched.push(record);
        }
    }

    let filtered = filter_records(&fetched, &window);
    let stats = aggregate(&filtered, &unit.terminal_states);
    Ok(assemble(
        unit, &cycle, window, &ids, &fetched, missing, filtered, stats,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{ChangeEvent, Cycle, ReportError};
    use crate::store::FsRecordStore;
    use crate::tracker::fake::FakeTracker;
    use chrono::{DateTime, NaiveDate};

    // Reference scenario: one cycle 2025-10-13..2025-10-26, window offset
    // -1 computed on 2025-10-30, which is 2025-10-20..2025-10-26.
    fn window() -> ReportWindow {
        ReportWindow::from_offset(NaiveDate::from_ymd_opt(2025, 10, 30).unwrap(), -1)
    }

    fn cycle() -> Cycle {
        Cycle::new(
            "c1",
            "Cycle 42",
            NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 26).unwrap(),
        )
    }

    fn unit() -> Unit {
        Unit {
            name: "backend".to_string(),
            team_id: "team-1".to_string(),
            board_id: "board-1".to_string(),
            component: None,
            terminal_states: vec!["Done".to_string()],
        }
    }

    fn record(id: &str, change_ts: &str) -> Record {
        Record {
            id: id.to_string(),
            title: format!("Item {id}"),
            state: "In Progress".to_string(),
            change_events: vec![ChangeEvent {
                timestamp: DateTime::parse_from_rfc3339(change_ts).unwrap(),
                field: "state".to_string(),
                old_value: Some("Todo".to_string()),
                new_value: Some("In Progress".to_string()),
                author: "alice".to_string(),
            }],
            comments: vec![],
        }
    }

    fn seeded_tracker() -> FakeTracker {
        // 15 records, exactly 3 with a change event inside the window.
        let mut tracker = FakeTracker::new().with_cycle(cycle());
        for n in 1..=12 {
            tracker = tracker.with_record(
                "c1",
                record(&format!("ENG-{n}"), "2025-10-14T09:00:00+00:00"),
            );
        }
        for n in 13..=15 {
            tracker = tracker.with_record(
                "c1",
                record(&format!("ENG-{n}"), "2025-10-22T09:00:00+00:00"),
            );
        }
        tracker
    }

    #[tokio::test]
    async fn end_to_end_filters_to_in_window_activity() {
        let root = tempfile::tempdir().unwrap();
        let store = FsRecordStore::open(root.path(), "run").unwrap();
        let tracker = seeded_tracker();

        let report = run(&unit(), window(), 5, &tracker, &store, &MultiProgress::default())
            .await
            .unwrap();

        assert_eq!(report.cycle.id, "c1");
        assert_eq!(report.total_records_in_cycle, 15);
        assert_eq!(report.fetched_count, 15);
        assert!(report.missing_ids.is_empty());
        let mut active = report
            .filtered_records
            .iter()
            .map(|f| f.record.id.as_str())
            .collect::<Vec<_>>();
        active.sort();
        assert_eq!(active, vec!["ENG-13", "ENG-14", "ENG-15"]);
        assert_eq!(report.contributor_stats[0].author, "alice");
        assert_eq!(report.contributor_stats[0].event_count, 3);
    }

    #[tokio::test]
    async fn transient_failures_converge_through_retry() {
        let root = tempfile::tempdir().unwrap();
        let store = FsRecordStore::open(root.path(), "run").unwrap();
        // Two failures, recovered within the 3 retry rounds.
        let tracker = seeded_tracker()
            .failing_times("ENG-3", 2)
            .failing_times("ENG-14", 1);

        let report = run(&unit(), window(), 5, &tracker, &store, &MultiProgress::default())
            .await
            .unwrap();

        assert!(report.missing_ids.is_empty());
        assert_eq!(report.fetched_count, 15);
        assert_eq!(report.filtered_records.len(), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_report_a_documented_gap() {
        let root = tempfile::tempdir().unwrap();
        let store = FsRecordStore::open(root.path(), "run").unwrap();
        let tracker = seeded_tracker().failing_times("ENG-13", usize::MAX);

        let report = run(&unit(), window(), 5, &tracker, &store, &MultiProgress::default())
            .await
            .unwrap();

        assert_eq!(report.missing_ids, vec!["ENG-13"]);
        assert_eq!(report.total_records_in_cycle, 15);
        assert_eq!(report.fetched_count, 14);
        assert_eq!(report.filtered_records.len(), 2);
    }

    #[tokio::test]
    async fn retry_only_refetches_the_missing_ids() {
        let root = tempfile::tempdir().unwrap();
        let store = FsRecordStore::open(root.path(), "run").unwrap();
        let tracker = seeded_tracker().failing_times("ENG-5", 1);

        run(&unit(), window(), 5, &tracker, &store, &MultiProgress::default())
            .await
            .unwrap();

        let calls = tracker.fetch_calls.lock().unwrap();
        // 15 initial fetches plus a single retry for the one failed id.
        assert_eq!(calls.len(), 16);
        assert_eq!(calls.iter().filter(|id| *id == "ENG-5").count(), 2);
    }

    #[tokio::test]
    async fn no_overlapping_cycle_aborts_the_run() {
        let root = tempfile::tempdir().unwrap();
        let store = FsRecordStore::open(root.path(), "run").unwrap();
        let tracker = FakeTracker::new().with_cycle(Cycle::new(
            "c9",
            "Old cycle",
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
        ));

        let result = run(&unit(), window(), 5, &tracker, &store, &MultiProgress::default()).await;
        assert!(matches!(result, Err(ReportError::NoCycleFound { .. })));
    }

    #[tokio::test]
    async fn batch_width_yields_identical_reports() {
        let mut summaries = Vec::new();
        for batch_size in [1, 10] {
            let root = tempfile::tempdir().unwrap();
            let store = FsRecordStore::open(root.path(), "run").unwrap();
            let tracker = seeded_tracker().failing_times("ENG-7", usize::MAX);
            let report =
                run(&unit(), window(), batch_size, &tracker, &store, &MultiProgress::default())
                    .await
                    .unwrap();
            summaries.push((
                report.fetched_count,
                report.missing_ids.clone(),
                report
                    .filtered_records
                    .iter()
                    .map(|f| f.record.id.clone())
                    .collect::<Vec<_>>(),
            ));
        }
        assert_eq!(summaries[0], summaries[1]);
    }
}
