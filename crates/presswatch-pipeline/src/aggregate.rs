//! Merging per-segment records into one ranked report

use presswatch_domain::{AnalysisReport, ArticleRecord, Fingerprint, SegmentOutcome};
use std::cmp::Reverse;

/// Merge parsed records and per-segment outcomes into a report
///
/// Records are grouped by priority tier in fixed tier order, highest
/// first. Within a tier the sort is stable on the optional rating
/// (higher first, unrated last), so records without ratings keep the
/// order they were parsed in and rated records break ties by original
/// order.
pub fn aggregate(
    source_id: impl Into<String>,
    fingerprint: Fingerprint,
    created_at: u64,
    mut records: Vec<ArticleRecord>,
    outcomes: Vec<SegmentOutcome>,
) -> AnalysisReport {
    records.sort_by_key(|r| (r.priority.rank(), Reverse(r.rating.unwrap_or(0))));
    AnalysisReport::new(source_id, fingerprint, created_at, records, outcomes)
}
