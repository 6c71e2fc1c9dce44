//! Stats command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::{ArchiveStats, Formatter};
use presswatch_domain::{PriorityTier, Taxonomy};
use presswatch_store::AnalysisStore;

/// Execute the stats command.
pub fn execute_stats(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = AnalysisStore::new(config.database_path()?)?;
    let rows = store.recent(None)?;

    let mut tier_totals: Vec<(PriorityTier, usize)> =
        PriorityTier::ALL.iter().map(|&tier| (tier, 0)).collect();
    for row in &rows {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&row.report) {
            for (tier, total) in tier_totals.iter_mut() {
                if let Some(n) = value["counts"][tier.as_str()].as_u64() {
                    *total += n as usize;
                }
            }
        }
    }

    // Keyword frequency over archived reports, matching the original
    // press-review habit of eyeballing which beats come up most.
    let lowered: Vec<String> = rows.iter().map(|row| row.report.to_lowercase()).collect();
    let taxonomy = Taxonomy::default();
    let mut keyword_hits: Vec<(String, usize)> = taxonomy
        .all_keywords()
        .map(|keyword| {
            let hits = lowered.iter().map(|text| text.matches(keyword).count()).sum();
            (keyword.to_string(), hits)
        })
        .collect();
    keyword_hits.retain(|(_, hits)| *hits > 0);
    keyword_hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let stats = ArchiveStats {
        analyses: store.count()?,
        sources: store.distinct_sources()?,
        tier_totals,
        keyword_hits,
    };
    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
