//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Presswatch - prioritized article extraction from scanned newspapers.
#[derive(Debug, Parser)]
#[command(name = "presswatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Markdown report format
    Markdown,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze an extracted newspaper text file
    Analyze(AnalyzeArgs),

    /// Search the analysis archive
    Search(SearchArgs),

    /// Show recent analyses
    History(HistoryArgs),

    /// Show archive statistics
    Stats,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text file with the extracted newspaper content
    pub file: PathBuf,

    /// Source name recorded in the archive (defaults to the file name)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Re-analyze even if this document was seen before
    #[arg(long)]
    pub force: bool,

    /// Override the maximum segment size (characters)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Override the number of parallel remote calls
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Attempts per segment (1 = no retry)
    #[arg(long, default_value = "1")]
    pub retries: u32,

    /// Model identifier override
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key for the remote service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Also write the markdown report to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query (matched against source names, reports and text)
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of entries
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Markdown => crate::config::OutputFormat::Markdown,
        }
    }
}
