use crate::model::{RecordId, ReportError, Result};
use crate::store::RecordStore;
use crate::tracker::TrackerClient;
use futures::future;
use indicatif::ProgressBar;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const MAX_BATCH_SIZE: usize = 10;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BatchOutcome {
    pub succeeded: BTreeSet<RecordId>,
    pub failed: BTreeSet<RecordId>,
}

/// Fetches every id in consecutive batches of `batch_size`. Batches run
/// sequentially; members of one batch run concurrently. Each record is
/// persisted the moment its fetch succeeds, so a crash mid-run loses at
/// most the in-flight batch. One failed id never aborts its batch.
pub async fn fetch_all<T, S>(
    tracker: &T,
    store: &S,
    ids: &[RecordId],
    batch_size: usize,
    pb: &ProgressBar,
) -> BatchOutcome
where
    T: TrackerClient,
    S: RecordStore,
{
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut outcome = BatchOutcome::default();
    for batch in ids.chunks(batch_size) {
        let results = future::join_all(batch.iter().map(|id| fetch_one(tracker, store, id))).await;
        for (id, result) in batch.iter().zip(results) {
            match result {
                Ok(()) => outcome.succeeded.insert(id.clone()),
                Err(_) => outcome.failed.insert(id.clone()),
            };
            pb.inc(1);
        }
    }
    outcome
}

async fn fetch_one<T, S>(tracker: &T, store: &S, id: &RecordId) -> Result<()>
where
    T: TrackerClient,
    S: RecordStore,
{
    let record = match timeout(FETCH_TIMEOUT, tracker.fetch_record(id)).await {
        Ok(result) => result?,
        Err(_) => return Err(ReportError::Timeout(FETCH_TIMEOUT)),
    };
    // The fetch only counts once the record is durable.
    store.put(id, &record).await
}
