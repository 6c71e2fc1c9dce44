//! Search command implementation.

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use presswatch_store::AnalysisStore;

/// Execute the search command.
pub fn execute_search(args: SearchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = AnalysisStore::new(config.database_path()?)?;
    let mut rows = store.search(&args.query)?;
    let matched = rows.len();
    rows.truncate(args.limit);

    if matched > rows.len() {
        println!(
            "{}",
            formatter.info(&format!(
                "{} match(es), showing the {} most recent",
                matched,
                rows.len()
            ))
        );
    }
    println!("{}", formatter.format_rows(&rows)?);
    Ok(())
}
