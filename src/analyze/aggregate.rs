use crate::model::{ContributorStat, EventKind, FilteredRecord};
use std::collections::BTreeMap;

/// Attributes one unit of activity per matched event to its author, in
/// the category implied by the event kind. Output is sorted by total
/// descending, ties broken by author name for determinism.
pub fn aggregate(filtered: &[FilteredRecord], terminal_states: &[String]) -> Vec<ContributorStat> {
    let mut by_author: BTreeMap<String, ContributorStat> = BTreeMap::new();
    for record in filtered {
        for event in &record.matched_events {
            let stat = by_author
                .entry(event.author().to_string())
                .or_insert_with(|| ContributorStat::new(event.author()));
            stat.event_count += 1;
            match event.kind(terminal_states) {
                EventKind::Closed => stat.closed += 1,
                EventKind::Transitioned => stat.transitioned += 1,
                EventKind::Commented => stat.commented += 1,
                EventKind::PrActivity => stat.pr_activity += 1,
                EventKind::CycleMembershipChanged => stat.cycle_membership_changed += 1,
            }
        }
    }

    let mut stats = by_author.into_values().collect::<Vec<_>>();
    stats.sort_by(|a, b| {
        b.event_count
            .cmp(&a.event_count)
            .then_with(|| a.author.cmp(&b.author))
    });
    stats
}
