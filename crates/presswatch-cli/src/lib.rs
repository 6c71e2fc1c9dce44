//! Presswatch CLI library.
//!
//! Command definitions, configuration, output formatting and the command
//! implementations behind the `presswatch` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::{Config, OutputFormat, Profile, Settings};
pub use error::{CliError, Result};
pub use output::{ArchiveStats, Formatter};
