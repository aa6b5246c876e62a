use crate::model::RecordId;
use crate::store::RecordStore;

/// Returns the expected ids that are absent from the store or whose
/// stored entry is not a structurally valid record. The store itself
/// already maps an entry without a change-history container to `None`,
/// so a malformed fetch surfaces here as missing.
pub async fn verify<S: RecordStore>(expected: &[RecordId], store: &S) -> Vec<RecordId> {
    let mut missing = Vec::new();
    for id in expected {
        let valid = match store.get(id).await {
            Ok(Some(record)) => !record.id.is_empty() && record.id == *id,
            _ => false,
        };
        if !valid {
            missing.push(id.clone());
        }
    }
    missing
}
