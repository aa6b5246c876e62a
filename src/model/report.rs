use crate::model::{ChangeEvent, Comment, Cycle, Record, RecordId, ReportWindow, Unit};
use chrono::{DateTime, FixedOffset};

pub const CYCLE_FIELD: &str = "cycle";
pub const STATE_FIELD: &str = "state";
pub const PR_FIELDS: [&str; 2] = ["pull_request", "pr_link"];

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MatchedEvent {
    Change(ChangeEvent),
    Comment(Comment),
}

impl MatchedEvent {
    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        match self {
            Self::Change(event) => &event.timestamp,
            Self::Comment(comment) => &comment.timestamp,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            Self::Change(event) => &event.author,
            Self::Comment(comment) => &comment.author,
        }
    }

    pub fn kind(&self, terminal_states: &[String]) -> EventKind {
        match self {
            Self::Comment(_) => EventKind::Commented,
            Self::Change(event) => match event.field.as_str() {
                CYCLE_FIELD => EventKind::CycleMembershipChanged,
                field if PR_FIELDS.contains(&field) => EventKind::PrActivity,
                STATE_FIELD
                    if event
                        .new_value
                        .as_deref()
                        .is_some_and(|state| terminal_states.iter().any(|t| t == state)) =>
                {
                    EventKind::Closed
                }
                _ => EventKind::Transitioned,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EventKind {
    Closed,
    Transitioned,
    Commented,
    PrActivity,
    CycleMembershipChanged,
}

/// A record together with the subset of its events inside the report
/// window. Only built with a non-empty `matched_events`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FilteredRecord {
    pub record: Record,
    pub matched_events: Vec<MatchedEvent>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ContributorStat {
    pub author: String,
    pub event_count: usize,
    pub closed: usize,
    pub transitioned: usize,
    pub commented: usize,
    pub pr_activity: usize,
    pub cycle_membership_changed: usize,
}

impl ContributorStat {
    pub fn new(author: impl ToString) -> Self {
        Self {
            author: author.to_string(),
            event_count: 0,
            closed: 0,
            transitioned: 0,
            commented: 0,
            pr_activity: 0,
            cycle_membership_changed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub unit: Unit,
    pub cycle: Cycle,
    pub window: ReportWindow,
    pub total_records_in_cycle: usize,
    pub fetched_count: usize,
    /// Ids still absent after the bounded retry rounds. Non-empty means the
    /// statistics were computed over partial data.
    pub missing_ids: Vec<RecordId>,
    pub filtered_records: Vec<FilteredRecord>,
    pub contributor_stats: Vec<ContributorStat>,
}
