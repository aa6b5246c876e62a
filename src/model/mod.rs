mod cycle;
mod error;
mod record;
mod report;
mod unit;
mod window;

pub use cycle::{Cycle, CycleMatch};
pub use error::{ReportError, Result};
pub use record::{ChangeEvent, Comment, Record, RecordId};
pub use report::{ContributorStat, EventKind, FilteredRecord, MatchedEvent, Report};
pub use unit::Unit;
pub use window::ReportWindow;
