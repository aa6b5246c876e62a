use crate::model::{Record, RecordId, ReportError, Result};
use crate::store::RecordStore;
use std::path::{Path, PathBuf};

/// One JSON file per record under a run-scoped directory, so concurrent
/// runs against the same root never collide.
pub struct FsRecordStore {
    dir: PathBuf,
}

impl FsRecordStore {
    pub fn open(root: impl AsRef<Path>, run_scope: &str) -> Result<Self> {
        let dir = root.as_ref().join(run_scope);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, id: &RecordId) -> PathBuf {
        let safe = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect::<String>();
        self.dir.join(format!("{safe}.json"))
    }
}

impl RecordStore for FsRecordStore {
    async fn put(&self, id: &RecordId, record: &Record) -> Result<()> {
        let payload = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(self.entry_path(id), payload)
            .await
            .map_err(|source| ReportError::Persistence {
                id: id.clone(),
                source,
            })
    }

    async fn get(&self, id: &RecordId) -> Result<Option<Record>> {
        let raw = match tokio::fs::read(self.entry_path(id)).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        // A file that no longer parses as a full record counts as absent;
        // the verifier will schedule a re-fetch.
        Ok(serde_json::from_slice(&raw).ok())
    }
}
