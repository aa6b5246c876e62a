mod fetcher;
mod verifier;

pub use fetcher::{fetch_all, BatchOutcome, DEFAULT_BATCH_SIZE};
pub use verifier::verify;
