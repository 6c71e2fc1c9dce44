//! History command implementation.

use crate::cli::HistoryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use presswatch_store::AnalysisStore;

/// Execute the history command.
pub fn execute_history(args: HistoryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = AnalysisStore::new(config.database_path()?)?;
    let rows = store.recent(Some(args.limit))?;
    println!("{}", formatter.format_rows(&rows)?);
    Ok(())
}
