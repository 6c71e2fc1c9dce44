//! Article record module - the unit of extracted information

use crate::tier::PriorityTier;

/// Placeholder page reference for records the service left unpaged
pub const UNKNOWN_PAGE: &str = "unknown";

/// A single structured extraction result
///
/// Created by the response parser from one record fragment; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Article headline (the only mandatory field)
    pub title: String,

    /// Assigned priority tier
    pub priority: PriorityTier,

    /// Page reference, free text or [`UNKNOWN_PAGE`]
    pub page: String,

    /// 1-2 sentence summary
    pub summary: String,

    /// One-sentence relevance rationale
    pub relevance: String,

    /// Optional 1-5 override ranking emitted by the service
    pub rating: Option<u8>,

    /// 1-based index of the segment this record was parsed from
    pub segment_index: usize,
}
