//! Analysis report module - the terminal, tier-grouped aggregate

use crate::document::Fingerprint;
use crate::record::ArticleRecord;
use crate::tier::PriorityTier;

/// Per-segment success/failure tally entry
///
/// A report carries one outcome per segment so callers can tell a
/// fully-successful "zero relevant articles" report apart from a report
/// whose segments failed at dispatch.
#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    /// 1-based segment index
    pub index: usize,

    /// Number of records parsed from this segment
    pub records: usize,

    /// Dispatch error text, if the segment's remote call failed
    pub error: Option<String>,
}

impl SegmentOutcome {
    /// Outcome of a segment whose remote call returned a reply
    pub fn succeeded(index: usize, records: usize) -> Self {
        Self {
            index,
            records,
            error: None,
        }
    }

    /// Outcome of a segment whose remote call failed
    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            records: 0,
            error: Some(error.into()),
        }
    }

    /// True when this segment contributed nothing because dispatch failed
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// The aggregated, tier-grouped output for one document
///
/// Owned exclusively by the aggregator; read-only once returned. Records
/// are held in fixed tier order (highest first), and within a tier in the
/// order the aggregator ranked them.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Source identifier of the analyzed document
    pub source_id: String,

    /// Fingerprint of the analyzed document
    pub fingerprint: Fingerprint,

    /// Unix timestamp (seconds) the report was produced
    pub created_at: u64,

    records: Vec<ArticleRecord>,
    tier_counts: Vec<(PriorityTier, usize)>,
    outcomes: Vec<SegmentOutcome>,
}

impl AnalysisReport {
    /// Build a report from tier-ordered records and per-segment outcomes
    ///
    /// Counts are derived here, so the per-tier sums always equal the
    /// total record count. `records` must already be grouped by tier.
    pub fn new(
        source_id: impl Into<String>,
        fingerprint: Fingerprint,
        created_at: u64,
        records: Vec<ArticleRecord>,
        outcomes: Vec<SegmentOutcome>,
    ) -> Self {
        let tier_counts = PriorityTier::ALL
            .iter()
            .map(|&tier| {
                let count = records.iter().filter(|r| r.priority == tier).count();
                (tier, count)
            })
            .collect();
        Self {
            source_id: source_id.into(),
            fingerprint,
            created_at,
            records,
            tier_counts,
            outcomes,
        }
    }

    /// All records, grouped by tier (highest first)
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Records belonging to one tier, in report order
    pub fn records_for(&self, tier: PriorityTier) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter().filter(move |r| r.priority == tier)
    }

    /// Per-tier record counts in rank order
    pub fn tier_counts(&self) -> &[(PriorityTier, usize)] {
        &self.tier_counts
    }

    /// Record count for one tier
    pub fn count_for(&self, tier: PriorityTier) -> usize {
        self.tier_counts
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Total record count
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Per-segment outcomes, in segment order
    pub fn outcomes(&self) -> &[SegmentOutcome] {
        &self.outcomes
    }

    /// Number of segments the document was carved into
    pub fn segments_total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of segments whose remote call failed
    pub fn segments_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// True when some but not all segments failed
    pub fn is_partial(&self) -> bool {
        let failed = self.segments_failed();
        failed > 0 && failed < self.segments_total()
    }

    /// True when every segment failed
    ///
    /// Distinguishes a failed analysis from a successful one that simply
    /// found nothing relevant.
    pub fn is_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.segments_failed() == self.segments_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UNKNOWN_PAGE;

    fn record(title: &str, priority: PriorityTier) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            priority,
            page: UNKNOWN_PAGE.to_string(),
            summary: String::new(),
            relevance: String::new(),
            rating: None,
            segment_index: 1,
        }
    }

    #[test]
    fn test_tier_counts_sum_to_total() {
        let report = AnalysisReport::new(
            "test.pdf",
            Fingerprint::compute("text"),
            0,
            vec![
                record("a", PriorityTier::Highest),
                record("b", PriorityTier::Highest),
                record("c", PriorityTier::Standard),
            ],
            vec![SegmentOutcome::succeeded(1, 3)],
        );
        let sum: usize = report.tier_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(sum, report.total());
        assert_eq!(report.count_for(PriorityTier::Highest), 2);
        assert_eq!(report.count_for(PriorityTier::High), 0);
        assert_eq!(report.count_for(PriorityTier::Standard), 1);
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = AnalysisReport::new(
            "empty.pdf",
            Fingerprint::compute("text"),
            0,
            vec![],
            vec![SegmentOutcome::succeeded(1, 0)],
        );
        assert_eq!(report.total(), 0);
        assert!(!report.is_partial());
        assert!(!report.is_failed());
    }

    #[test]
    fn test_partial_and_failed_are_distinct() {
        let partial = AnalysisReport::new(
            "partial.pdf",
            Fingerprint::compute("a"),
            0,
            vec![],
            vec![
                SegmentOutcome::succeeded(1, 0),
                SegmentOutcome::failed(2, "timeout"),
            ],
        );
        assert!(partial.is_partial());
        assert!(!partial.is_failed());

        let failed = AnalysisReport::new(
            "failed.pdf",
            Fingerprint::compute("b"),
            0,
            vec![],
            vec![
                SegmentOutcome::failed(1, "timeout"),
                SegmentOutcome::failed(2, "service unavailable"),
            ],
        );
        assert!(failed.is_failed());
        assert!(!failed.is_partial());
        assert_eq!(failed.segments_failed(), 2);
    }

    #[test]
    fn test_records_for_filters_by_tier() {
        let report = AnalysisReport::new(
            "test.pdf",
            Fingerprint::compute("text"),
            0,
            vec![
                record("top", PriorityTier::Highest),
                record("low", PriorityTier::Standard),
            ],
            vec![],
        );
        let titles: Vec<_> = report
            .records_for(PriorityTier::Highest)
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["top"]);
    }
}
