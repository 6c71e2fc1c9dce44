//! Presswatch Pipeline
//!
//! The segmentation-dispatch-parse-aggregate pipeline: splits long
//! newspaper text into bounded segments at safe boundaries, submits each
//! segment to the remote generative-text service, parses the semi-
//! structured replies into typed article records, and merges everything
//! into one tier-grouped report. A dedup gate in front of the pipeline
//! suppresses re-analysis of already-seen documents.
//!
//! # Architecture
//!
//! ```text
//! Document → DedupGate → Segmenter → PromptBuilder → Dispatcher
//!                                                        ↓
//!                         AnalysisReport ← aggregate ← parser
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use presswatch_pipeline::{Analyzer, DedupGate, PipelineConfig};
//! use presswatch_domain::{Document, Taxonomy};
//! use presswatch_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new("TITLE: Council session\nPRIORITY: highest");
//! let analyzer = Analyzer::new(provider, Taxonomy::default(), PipelineConfig::default());
//! let gate = DedupGate::new();
//!
//! let document = Document::new("gazette.pdf", "Council met on Tuesday...");
//! if gate.claim(&document) {
//!     let report = analyzer.analyze(&document).await?;
//!     println!("{} article(s) found", report.total());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod analyzer;
mod config;
mod dedup;
mod dispatch;
mod error;
pub mod parser;
mod prompt;
mod segmenter;


pub use aggregate::aggregate;
pub use analyzer::Analyzer;
pub use config::PipelineConfig;
pub use dedup::DedupGate;
pub use dispatch::{CancelHandle, Dispatcher, RetryPolicy};
pub use error::{AnalyzeError, DispatchError};
pub use prompt::PromptBuilder;
pub use segmenter::{Segmenter, DEFAULT_MARKER_TOKENS};
