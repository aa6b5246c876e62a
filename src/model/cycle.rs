use crate::model::{ReportError, ReportWindow, Result};
use chrono::NaiveDate;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Cycle {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// Create
impl Cycle {
    pub fn new(
        id: impl ToString,
        name: impl ToString,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            start_date,
            end_date,
        }
    }
}

// Matcher
impl Cycle {
    fn overlap_days(&self, window: &ReportWindow) -> i64 {
        let start = self.start_date.max(window.start_date);
        let end = self.end_date.min(window.end_date);
        ((end - start).num_days() + 1).max(0)
    }
}

pub trait CycleMatch {
    /// Selects the cycle with the strictly greatest day overlap against the
    /// window. A tie is a data-integrity signal, never a silent pick.
    fn match_window(&self, window: &ReportWindow) -> Result<&Cycle>;
}

impl CycleMatch for [Cycle] {
    fn match_window(&self, window: &ReportWindow) -> Result<&Cycle> {
        let max_overlap = self
            .iter()
            .map(|cycle| cycle.overlap_days(window))
            .max()
            .unwrap_or(0);
        if max_overlap == 0 {
            return Err(ReportError::NoCycleFound {
                start: window.start_date,
                end: window.end_date,
            });
        }

        let best = self
            .iter()
            .filter(|cycle| cycle.overlap_days(window) == max_overlap)
            .collect::<Vec<_>>();
        match best.as_slice() {
            [cycle] => Ok(*cycle),
            tied => Err(ReportError::AmbiguousCycle(
                tied.iter().map(|cycle| cycle.id.clone()).collect(),
            )),
        }
    }
}
