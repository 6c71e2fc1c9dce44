//! Presswatch Domain Layer
//!
//! This crate contains the core domain model for presswatch: the data that
//! flows through the newspaper-analysis pipeline and the trait interfaces
//! the other layers implement. Apart from the SHA-256 primitive it has no
//! external dependencies.
//!
//! ## Key Concepts
//!
//! - **Document**: immutable source text with a content fingerprint
//! - **Segment**: a bounded slice of a document submitted as one analysis unit
//! - **ArticleRecord**: a single structured extraction result
//! - **PriorityTier**: fixed, ordered relevance classes (highest → standard)
//! - **Taxonomy**: per-tier topic lists plus the keyword fallback classifier
//! - **AnalysisReport**: the tier-grouped aggregate for one document
//!
//! ## Architecture
//!
//! - Pure data and pure functions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the remote generative-text service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod record;
pub mod report;
pub mod segment;
pub mod taxonomy;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use document::{Document, Fingerprint};
pub use record::{ArticleRecord, UNKNOWN_PAGE};
pub use report::{AnalysisReport, SegmentOutcome};
pub use segment::Segment;
pub use taxonomy::{Taxonomy, TopicGroup};
pub use tier::PriorityTier;
