use crate::model::{
    ContributorStat, Cycle, FilteredRecord, Record, RecordId, Report, ReportWindow, Unit,
};

/// Pure composition of the pipeline outputs. `total_records_in_cycle`
/// counts every id the cycle listed, regardless of filtering or gaps.
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    unit: &Unit,
    cycle: &Cycle,
    window: ReportWindow,
    expected_ids: &[RecordId],
    fetched: &[Record],
    missing_ids: Vec<RecordId>,
    filtered_records: Vec<FilteredRecord>,
    contributor_stats: Vec<ContributorStat>,
) -> Report {
    Report {
        unit: unit.clone(),
        cycle: cycle.clone(),
        window,
        total_records_in_cycle: expected_ids.len(),
        fetched_count: fetched.len(),
        missing_ids,
        filtered_records,
        contributor_stats,
    }
}
