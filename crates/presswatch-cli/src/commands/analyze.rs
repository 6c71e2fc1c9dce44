//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use presswatch_domain::{Document, Taxonomy};
use presswatch_llm::GeminiProvider;
use presswatch_pipeline::{Analyzer, DedupGate, RetryPolicy};
use presswatch_store::{AnalysisStore, ArchiveEntry};
use std::fs;
use std::time::Duration;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput(format!(
            "No text found in {}",
            args.file.display()
        )));
    }

    let source_id = args.source.clone().unwrap_or_else(|| {
        args.file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| args.file.display().to_string())
    });
    let document = Document::new(source_id, text);

    // Dedup gate, seeded from the archive. --force bypasses it.
    let mut store = AnalysisStore::new(config.database_path()?)?;
    let gate = DedupGate::with_seen(store.seen_fingerprints()?);
    if !args.force && !gate.claim(&document) {
        println!(
            "{}",
            formatter.info(&format!(
                "Already analyzed ({}). Use --force to re-analyze.",
                document.fingerprint
            ))
        );
        return Ok(());
    }

    let profile = config.get_active_profile()?;
    let api_key = args
        .api_key
        .clone()
        .or_else(|| profile.api_key.clone())
        .ok_or(CliError::MissingApiKey)?;
    let model = args.model.clone().unwrap_or_else(|| profile.model.clone());
    let provider = GeminiProvider::new(&profile.endpoint, model, api_key);

    let mut pipeline_config = config.pipeline.clone();
    if let Some(chunk_size) = args.chunk_size {
        pipeline_config.max_chunk_size = chunk_size;
    }
    if let Some(parallelism) = args.parallelism {
        pipeline_config.parallelism = parallelism;
    }
    pipeline_config.validate().map_err(CliError::Config)?;

    let mut analyzer = Analyzer::new(provider, Taxonomy::default(), pipeline_config);
    if args.retries > 1 {
        analyzer = analyzer.with_retry(RetryPolicy::new(args.retries, Duration::from_secs(1)));
    }

    let report = analyzer.analyze(&document).await?;

    let entry = ArchiveEntry::from_report(&report, &document)?;
    if store.append(&entry)? {
        println!("{}", formatter.success("Saved to archive"));
    } else {
        println!("{}", formatter.info("Archive already holds this document"));
    }

    println!("{}", formatter.format_report(&report)?);

    if let Some(path) = &args.output {
        let markdown = Formatter::new(OutputFormat::Markdown, false).format_report(&report)?;
        fs::write(path, markdown)?;
        println!(
            "{}",
            formatter.success(&format!("Report written to {}", path.display()))
        );
    }

    Ok(())
}
