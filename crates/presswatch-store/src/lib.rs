//! Presswatch Storage Layer
//!
//! Append-only SQLite archive of finished analyses. The pipeline only
//! writes here; the archive additionally feeds the dedup gate across runs
//! (seen fingerprints) and backs the CLI's search, history and stats
//! reads. Rows are advisory, never updated or deleted.
//!
//! # Examples
//!
//! ```no_run
//! use presswatch_store::AnalysisStore;
//!
//! let store = AnalysisStore::new("presswatch.db").unwrap();
//! let seen = store.seen_fingerprints().unwrap();
//! ```

#![warn(missing_docs)]

use presswatch_domain::{AnalysisReport, Document, Fingerprint};
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Maximum characters of original text kept alongside an archived report
pub const PREVIEW_CHARS: usize = 500;

/// One appendable archive record, as the pipeline hands it over
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Fingerprint of the analyzed document (primary key)
    pub fingerprint: Fingerprint,

    /// Unix timestamp (seconds) the report was produced
    pub created_at: u64,

    /// Source identifier of the document
    pub source_id: String,

    /// Serialized report JSON
    pub report: String,

    /// Original text truncated to [`PREVIEW_CHARS`]
    pub text_preview: String,
}

impl ArchiveEntry {
    /// Build an entry from a finished report and its source document
    pub fn from_report(report: &AnalysisReport, document: &Document) -> Result<Self, StoreError> {
        Ok(Self {
            fingerprint: report.fingerprint.clone(),
            created_at: report.created_at,
            source_id: report.source_id.clone(),
            report: serde_json::to_string(&report_json(report))?,
            text_preview: truncate_preview(&document.text, PREVIEW_CHARS),
        })
    }
}

/// One archived analysis, as reads return it
#[derive(Debug, Clone)]
pub struct ArchiveRow {
    /// Fingerprint of the analyzed document
    pub fingerprint: Fingerprint,

    /// Unix timestamp (seconds) of the analysis
    pub created_at: u64,

    /// Source identifier of the document
    pub source_id: String,

    /// Serialized report JSON
    pub report: String,

    /// Truncated original text
    pub text_preview: String,
}

/// SQLite-backed analysis archive
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its
/// own `AnalysisStore`.
pub struct AnalysisStore {
    conn: Connection,
}

impl AnalysisStore {
    /// Open (or create) an archive at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Append one analysis
    ///
    /// Returns true when the row was new, false when a row with the same
    /// fingerprint already existed (the archive keeps the first one).
    pub fn append(&mut self, entry: &ArchiveEntry) -> Result<bool, StoreError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO analyses
             (fingerprint, created_at, source_id, report, text_preview)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.fingerprint.as_str(),
                entry.created_at as i64,
                entry.source_id,
                entry.report,
                entry.text_preview,
            ],
        )?;
        Ok(inserted > 0)
    }

    /// All archived fingerprints, for seeding the dedup gate
    pub fn seen_fingerprints(&self) -> Result<Vec<Fingerprint>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT fingerprint FROM analyses")?;
        let rows = stmt.query_map([], |row| {
            Ok(Fingerprint::from_hex(row.get::<_, String>(0)?))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Most recent analyses, newest first
    pub fn recent(&self, limit: Option<usize>) -> Result<Vec<ArchiveRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT fingerprint, created_at, source_id, report, text_preview
             FROM analyses ORDER BY created_at DESC, fingerprint LIMIT ?1",
        )?;
        let limit = limit.map(|n| n as i64).unwrap_or(-1);
        let rows = stmt.query_map(params![limit], row_to_archive)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Case-insensitive substring search across source id, report and
    /// text preview
    pub fn search(&self, query: &str) -> Result<Vec<ArchiveRow>, StoreError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT fingerprint, created_at, source_id, report, text_preview
             FROM analyses
             WHERE lower(source_id) LIKE ?1
                OR lower(report) LIKE ?1
                OR lower(text_preview) LIKE ?1
             ORDER BY created_at DESC, fingerprint",
        )?;
        let rows = stmt.query_map(params![pattern], row_to_archive)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of archived analyses
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of distinct source identifiers in the archive
    pub fn distinct_sources(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT source_id) FROM analyses",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn row_to_archive(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArchiveRow> {
    Ok(ArchiveRow {
        fingerprint: Fingerprint::from_hex(row.get::<_, String>(0)?),
        created_at: row.get::<_, i64>(1)? as u64,
        source_id: row.get(2)?,
        report: row.get(3)?,
        text_preview: row.get(4)?,
    })
}

/// Serialize a report into the archive's JSON shape
pub fn report_json(report: &AnalysisReport) -> serde_json::Value {
    let records: Vec<serde_json::Value> = report
        .records()
        .iter()
        .map(|r| {
            serde_json::json!({
                "title": r.title,
                "priority": r.priority.as_str(),
                "page": r.page,
                "summary": r.summary,
                "relevance": r.relevance,
                "rating": r.rating,
                "segment": r.segment_index,
            })
        })
        .collect();

    let counts: serde_json::Map<String, serde_json::Value> = report
        .tier_counts()
        .iter()
        .map(|(tier, n)| (tier.as_str().to_string(), serde_json::json!(n)))
        .collect();

    serde_json::json!({
        "source_id": report.source_id,
        "fingerprint": report.fingerprint.as_str(),
        "created_at": report.created_at,
        "total": report.total(),
        "counts": counts,
        "segments": {
            "total": report.segments_total(),
            "failed": report.segments_failed(),
        },
        "records": records,
    })
}

/// Truncate text to at most `max_chars` characters, appending an ellipsis
/// when anything was cut
fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswatch_domain::{ArticleRecord, PriorityTier, SegmentOutcome, UNKNOWN_PAGE};

    fn sample_report(document: &Document) -> AnalysisReport {
        AnalysisReport::new(
            document.source_id.clone(),
            document.fingerprint.clone(),
            1_700_000_000,
            vec![ArticleRecord {
                title: "Council approves budget".to_string(),
                priority: PriorityTier::Highest,
                page: UNKNOWN_PAGE.to_string(),
                summary: "Budget passed.".to_string(),
                relevance: "Local politics.".to_string(),
                rating: Some(5),
                segment_index: 1,
            }],
            vec![SegmentOutcome::succeeded(1, 1)],
        )
    }

    fn sample_entry(source_id: &str, text: &str) -> ArchiveEntry {
        let document = Document::new(source_id, text);
        let report = sample_report(&document);
        ArchiveEntry::from_report(&report, &document).unwrap()
    }

    #[test]
    fn test_append_then_duplicate_ignored() {
        let mut store = AnalysisStore::new(":memory:").unwrap();
        let entry = sample_entry("gazette.pdf", "edition one");

        assert!(store.append(&entry).unwrap());
        assert!(!store.append(&entry).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_seen_fingerprints_round_trip() {
        let mut store = AnalysisStore::new(":memory:").unwrap();
        let entry = sample_entry("gazette.pdf", "edition one");
        store.append(&entry).unwrap();

        let seen = store.seen_fingerprints().unwrap();
        assert_eq!(seen, vec![entry.fingerprint]);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut store = AnalysisStore::new(":memory:").unwrap();

        let mut old = sample_entry("old.pdf", "old edition");
        old.created_at = 100;
        let mut new = sample_entry("new.pdf", "new edition");
        new.created_at = 200;

        store.append(&old).unwrap();
        store.append(&new).unwrap();

        let rows = store.recent(None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_id, "new.pdf");
        assert_eq!(rows[1].source_id, "old.pdf");

        let limited = store.recent(Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].source_id, "new.pdf");
    }

    #[test]
    fn test_search_matches_across_columns() {
        let mut store = AnalysisStore::new(":memory:").unwrap();
        store
            .append(&sample_entry("gazette.pdf", "the mayor spoke"))
            .unwrap();
        store
            .append(&sample_entry("courier.pdf", "sports results"))
            .unwrap();

        // by source name
        assert_eq!(store.search("Gazette").unwrap().len(), 1);
        // by preview text
        assert_eq!(store.search("MAYOR").unwrap().len(), 1);
        // by report content (both share the same report title)
        assert_eq!(store.search("budget").unwrap().len(), 2);
        // no hit
        assert!(store.search("nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_distinct_sources() {
        let mut store = AnalysisStore::new(":memory:").unwrap();
        store.append(&sample_entry("a.pdf", "first")).unwrap();
        store.append(&sample_entry("a.pdf", "second")).unwrap();
        store.append(&sample_entry("b.pdf", "third")).unwrap();
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.distinct_sources().unwrap(), 2);
    }

    #[test]
    fn test_persists_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.db");

        {
            let mut store = AnalysisStore::new(&path).unwrap();
            store.append(&sample_entry("gazette.pdf", "persisted")).unwrap();
        }

        let store = AnalysisStore::new(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_preview_truncation() {
        let long_text = "x".repeat(PREVIEW_CHARS + 100);
        let entry = sample_entry("long.pdf", &long_text);
        assert_eq!(entry.text_preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(entry.text_preview.ends_with("..."));

        let short = sample_entry("short.pdf", "short text");
        assert_eq!(short.text_preview, "short text");
    }

    #[test]
    fn test_report_json_shape() {
        let document = Document::new("gazette.pdf", "text");
        let value = report_json(&sample_report(&document));

        assert_eq!(value["total"], 1);
        assert_eq!(value["counts"]["highest"], 1);
        assert_eq!(value["counts"]["standard"], 0);
        assert_eq!(value["segments"]["failed"], 0);
        assert_eq!(value["records"][0]["title"], "Council approves budget");
        assert_eq!(value["records"][0]["rating"], 5);
    }
}
