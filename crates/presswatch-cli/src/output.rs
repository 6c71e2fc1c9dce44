//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::DateTime;
use colored::*;
use presswatch_domain::{AnalysisReport, PriorityTier};
use presswatch_store::{report_json, ArchiveRow};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Archive-wide statistics gathered by the stats command.
#[derive(Debug, Clone)]
pub struct ArchiveStats {
    /// Total archived analyses
    pub analyses: usize,

    /// Distinct source identifiers
    pub sources: usize,

    /// Record totals per tier across all archived reports
    pub tier_totals: Vec<(PriorityTier, usize)>,

    /// Taxonomy keyword frequencies across archived reports, most
    /// frequent first
    pub keyword_hits: Vec<(String, usize)>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis report.
    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report_json(report))?),
            OutputFormat::Markdown => Ok(self.format_report_markdown(report)),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    /// Format a report as a markdown document.
    fn format_report_markdown(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Press review: {}\n\n", report.source_id));
        out.push_str(&format!(
            "{} article(s) from {} segment(s) - {}\n\n",
            report.total(),
            report.segments_total(),
            format_date(report.created_at)
        ));

        if report.is_failed() {
            out.push_str("**Analysis failed: every segment errored; no articles could be extracted.**\n");
            return out;
        }
        if report.is_partial() {
            out.push_str(&format!(
                "**Partial report: {} of {} segment(s) failed.**\n\n",
                report.segments_failed(),
                report.segments_total()
            ));
        }

        for tier in PriorityTier::ALL {
            let count = report.count_for(tier);
            if count == 0 {
                continue;
            }
            out.push_str(&format!("## {} ({})\n\n", tier.label(), count));
            for record in report.records_for(tier) {
                out.push_str(&format!("- **{}** (page {}", record.title, record.page));
                if let Some(rating) = record.rating {
                    out.push_str(&format!(", rating {}/5", rating));
                }
                out.push_str(")\n");
                if !record.summary.is_empty() {
                    out.push_str(&format!("  {}\n", record.summary));
                }
                if !record.relevance.is_empty() {
                    out.push_str(&format!("  _{}_\n", record.relevance));
                }
            }
            out.push('\n');
        }

        if report.total() == 0 {
            out.push_str("No relevant articles found.\n");
        }
        out
    }

    /// Format a report as a summary line plus a record table.
    fn format_report_table(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();

        let counts = report
            .tier_counts()
            .iter()
            .map(|(tier, n)| format!("{}: {}", tier.as_str(), n))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{} article(s) from {} segment(s) ({})\n",
            report.total(),
            report.segments_total(),
            counts
        ));

        if report.is_failed() {
            out.push_str(&self.error("Analysis failed: every segment errored."));
            out.push('\n');
            return out;
        }
        if report.is_partial() {
            out.push_str(&self.warning(&format!(
                "Partial report: {} of {} segment(s) failed.",
                report.segments_failed(),
                report.segments_total()
            )));
            out.push('\n');
        }
        if report.total() == 0 {
            out.push_str(&self.colorize("No relevant articles found.", "yellow"));
            out.push('\n');
            return out;
        }

        let mut builder = Builder::default();
        builder.push_record(["Tier", "Title", "Page", "Rating", "Summary"]);
        for record in report.records() {
            let rating = record
                .rating
                .map(|r| format!("{}/5", r))
                .unwrap_or_else(|| "-".to_string());
            builder.push_record([
                record.priority.as_str(),
                &record.title,
                &record.page,
                &rating,
                &record.summary,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        out.push_str(&table.to_string());
        out
    }

    /// Format archive rows (search and history results).
    pub fn format_rows(&self, rows: &[ArchiveRow]) -> Result<String> {
        if rows.is_empty() {
            return Ok(self.colorize("No archived analyses found.", "yellow"));
        }

        match self.format {
            OutputFormat::Json => {
                let reports: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|row| {
                        serde_json::from_str(&row.report)
                            .unwrap_or_else(|_| serde_json::json!({ "raw": row.report }))
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&reports)?)
            }
            OutputFormat::Markdown => {
                let mut out = String::new();
                for row in rows {
                    out.push_str(&format!(
                        "- **{}** ({}): {} article(s) - {}\n",
                        row.source_id,
                        format_date(row.created_at),
                        archived_total(row),
                        truncate(&row.text_preview, 80)
                    ));
                }
                Ok(out)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Date", "Source", "Articles", "Fingerprint", "Preview"]);
                for row in rows {
                    let date = format_date(row.created_at);
                    let total = archived_total(row);
                    let preview = truncate(&row.text_preview, 60);
                    builder.push_record([
                        date.as_str(),
                        &row.source_id,
                        &total,
                        &row.fingerprint.as_str()[..12],
                        &preview,
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format archive statistics.
    pub fn format_stats(&self, stats: &ArchiveStats) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let keywords: serde_json::Map<String, serde_json::Value> = stats
                .keyword_hits
                .iter()
                .map(|(k, n)| (k.clone(), serde_json::json!(n)))
                .collect();
            let tiers: serde_json::Map<String, serde_json::Value> = stats
                .tier_totals
                .iter()
                .map(|(tier, n)| (tier.as_str().to_string(), serde_json::json!(n)))
                .collect();
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "analyses": stats.analyses,
                "sources": stats.sources,
                "records_per_tier": tiers,
                "keyword_hits": keywords,
            }))?);
        }

        let mut out = String::new();
        out.push_str(&format!(
            "{} analysis(es) across {} source(s)\n\n",
            stats.analyses, stats.sources
        ));

        out.push_str("Records per tier:\n");
        for (tier, n) in &stats.tier_totals {
            out.push_str(&format!("  {:<18} {}\n", tier.label(), n));
        }

        if !stats.keyword_hits.is_empty() {
            out.push_str("\nFrequent taxonomy keywords:\n");
            for (keyword, n) in stats.keyword_hits.iter().take(10) {
                out.push_str(&format!("  {:<18} {}\n", keyword, n));
            }
        }
        Ok(out)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render a unix timestamp as a date and time.
fn format_date(unix_secs: u64) -> String {
    DateTime::from_timestamp(unix_secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| unix_secs.to_string())
}

/// Total record count of an archived report, from its stored JSON.
fn archived_total(row: &ArchiveRow) -> String {
    serde_json::from_str::<serde_json::Value>(&row.report)
        .ok()
        .and_then(|v| v.get("total").and_then(|t| t.as_u64()))
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Truncate to at most `max_chars` characters on a character boundary.
fn truncate(text: &str, max_chars: usize) -> String {
    let flattened = text.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut cut: String = flattened.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswatch_domain::{
        ArticleRecord, Document, Fingerprint, SegmentOutcome, UNKNOWN_PAGE,
    };

    fn sample_report() -> AnalysisReport {
        AnalysisReport::new(
            "gazette.pdf",
            Fingerprint::compute("text"),
            1_700_000_000,
            vec![
                ArticleRecord {
                    title: "Council approves budget".to_string(),
                    priority: PriorityTier::Highest,
                    page: "3".to_string(),
                    summary: "Budget passed after debate.".to_string(),
                    relevance: "Core local politics.".to_string(),
                    rating: Some(5),
                    segment_index: 1,
                },
                ArticleRecord {
                    title: "Flea market dates".to_string(),
                    priority: PriorityTier::Standard,
                    page: UNKNOWN_PAGE.to_string(),
                    summary: String::new(),
                    relevance: String::new(),
                    rating: None,
                    segment_index: 1,
                },
            ],
            vec![SegmentOutcome::succeeded(1, 2)],
        )
    }

    #[test]
    fn test_markdown_report() {
        let formatter = Formatter::new(OutputFormat::Markdown, false);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("# Press review: gazette.pdf"));
        assert!(output.contains("## HIGHEST PRIORITY (1)"));
        assert!(output.contains("**Council approves budget** (page 3, rating 5/5)"));
        assert!(output.contains("## STANDARD (1)"));
        // empty middle tier is skipped entirely
        assert!(!output.contains("HIGH PRIORITY"));
    }

    #[test]
    fn test_table_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("2 article(s) from 1 segment(s)"));
        assert!(output.contains("Council approves budget"));
        assert!(output.contains("Title"));
    }

    #[test]
    fn test_json_report() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 2);
    }

    #[test]
    fn test_failed_report_is_marked() {
        let report = AnalysisReport::new(
            "broken.pdf",
            Fingerprint::compute("x"),
            0,
            vec![],
            vec![SegmentOutcome::failed(1, "timeout")],
        );
        let formatter = Formatter::new(OutputFormat::Markdown, false);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Analysis failed"));
    }

    #[test]
    fn test_empty_report_mentions_nothing_found() {
        let report = AnalysisReport::new(
            "quiet.pdf",
            Fingerprint::compute("x"),
            0,
            vec![],
            vec![SegmentOutcome::succeeded(1, 0)],
        );
        let formatter = Formatter::new(OutputFormat::Markdown, false);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("No relevant articles found."));
        assert!(!output.contains("Analysis failed"));
    }

    #[test]
    fn test_format_rows_empty() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rows(&[]).unwrap();
        assert!(output.contains("No archived analyses"));
    }

    #[test]
    fn test_format_rows_table() {
        let document = Document::new("gazette.pdf", "the mayor spoke");
        let entry =
            presswatch_store::ArchiveEntry::from_report(&sample_report(), &document).unwrap();
        let row = ArchiveRow {
            fingerprint: entry.fingerprint,
            created_at: entry.created_at,
            source_id: entry.source_id,
            report: entry.report,
            text_preview: entry.text_preview,
        };

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rows(&[row]).unwrap();
        assert!(output.contains("gazette.pdf"));
        assert!(output.contains("2")); // archived total from report JSON
    }

    #[test]
    fn test_truncate_flattens_newlines() {
        assert_eq!(truncate("a\nb\nc", 10), "a b c");
        let long = "x".repeat(100);
        assert_eq!(truncate(&long, 10).chars().count(), 11);
    }

    #[test]
    fn test_colors_disabled_passthrough() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
