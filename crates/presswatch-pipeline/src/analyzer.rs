//! Pipeline orchestrator
//!
//! Drives one document through segmentation, prompt construction,
//! dispatch, parsing and aggregation. Progression is one-way; a segment
//! that fails at dispatch degrades to zero records and a failed outcome
//! instead of halting the run.

use crate::aggregate::aggregate;
use crate::config::PipelineConfig;
use crate::dispatch::{CancelHandle, Dispatcher, RetryPolicy};
use crate::error::AnalyzeError;
use crate::parser;
use crate::prompt::PromptBuilder;
use crate::segmenter::Segmenter;
use presswatch_domain::traits::TextGenerator;
use presswatch_domain::{AnalysisReport, Document, SegmentOutcome, Taxonomy};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Runs the full analysis pipeline for one document at a time
pub struct Analyzer<P: TextGenerator> {
    dispatcher: Dispatcher<P>,
    taxonomy: Taxonomy,
    config: PipelineConfig,
}

impl<P> Analyzer<P>
where
    P: TextGenerator + Send + Sync + 'static,
{
    /// Create an analyzer over a provider, taxonomy and configuration
    pub fn new(provider: P, taxonomy: Taxonomy, config: PipelineConfig) -> Self {
        let dispatcher = Dispatcher::new(provider, &config);
        Self {
            dispatcher,
            taxonomy,
            config,
        }
    }

    /// Wrap every remote call in a retry policy
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.dispatcher = self.dispatcher.with_retry(policy);
        self
    }

    /// Handle for aborting the remaining segments of a running analysis
    ///
    /// Results of already-completed segments stay in the report; a
    /// partial report is a first-class outcome, not a failure.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.dispatcher.cancel_handle()
    }

    /// Analyze one document into a tier-grouped report
    pub async fn analyze(&self, document: &Document) -> Result<AnalysisReport, AnalyzeError> {
        if document.text.len() > self.config.max_text_length {
            return Err(AnalyzeError::TextTooLong(
                document.text.len(),
                self.config.max_text_length,
            ));
        }

        info!(
            "Starting analysis for '{}', text length {}",
            document.source_id,
            document.text.len()
        );

        let segmenter = Segmenter::new(self.config.max_chunk_size)
            .with_marker_tokens(self.config.marker_tokens.clone());
        let segments = segmenter.segment(&document.text);
        info!("Split text into {} segment(s)", segments.len());

        let prompts: Vec<String> = segments
            .iter()
            .map(|segment| PromptBuilder::new(segment, &self.taxonomy).build())
            .collect();

        let replies = self.dispatcher.dispatch(prompts).await;

        let mut records = Vec::new();
        let mut outcomes = Vec::with_capacity(segments.len());
        for (segment, reply) in segments.iter().zip(replies) {
            match reply {
                Ok(raw) => {
                    let parsed = parser::parse(&raw, segment.index, &self.taxonomy);
                    debug!("Segment {}: parsed {} record(s)", segment.index, parsed.len());
                    outcomes.push(SegmentOutcome::succeeded(segment.index, parsed.len()));
                    records.extend(parsed);
                }
                Err(error) => {
                    warn!(
                        "Segment {}/{} failed: {}",
                        segment.index, segment.total, error
                    );
                    outcomes.push(SegmentOutcome::failed(segment.index, error.to_string()));
                }
            }
        }

        let report = aggregate(
            document.source_id.clone(),
            document.fingerprint.clone(),
            unix_now(),
            records,
            outcomes,
        );

        info!(
            "Analysis complete for '{}': {} record(s) from {} segment(s), {} failed",
            document.source_id,
            report.total(),
            report.segments_total(),
            report.segments_failed()
        );

        Ok(report)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
