use chrono::{Datelike, Duration, NaiveDate};

/// A Monday..Sunday calendar span, derived from a signed week offset
/// relative to an injected reference date.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ReportWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportWindow {
    pub fn from_offset(today: NaiveDate, offset: i64) -> Self {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64)
            + Duration::weeks(offset);
        Self {
            start_date: monday,
            end_date: monday + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
