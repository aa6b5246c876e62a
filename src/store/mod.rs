mod fs;

pub use fs::FsRecordStore;

use crate::model::{Record, RecordId, Result};

/// Durable keyed persistence for fetched records. `put` is a full
/// overwrite, never a merge, so a retried fetch is idempotent.
pub trait RecordStore {
    async fn put(&self, id: &RecordId, record: &Record) -> Result<()>;
    async fn get(&self, id: &RecordId) -> Result<Option<Record>>;
}
