//! Document module - source text with a deterministic content fingerprint

use sha2::{Digest, Sha256};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic content fingerprint: lowercase-hex SHA-256 of the
/// normalized document text
///
/// Fingerprints are stable across runs and are the primary dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a document text
    ///
    /// The text is normalized first (see [`normalize`]) so cosmetic
    /// differences in line endings or outer whitespace do not produce
    /// distinct fingerprints.
    pub fn compute(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize(text).as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Rehydrate a fingerprint from its hex form
    ///
    /// This is primarily for the storage layer; no validation is performed
    /// beyond lowercasing.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_lowercase())
    }

    /// The hex form of the fingerprint
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize document text before hashing
///
/// CRLF line endings become LF and outer whitespace is trimmed. The body
/// of the text is untouched.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// A source document: the raw extracted newspaper text plus identity
///
/// Immutable once created; the fingerprint is computed in the constructor
/// and never changes.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source identifier (filename or equivalent)
    pub source_id: String,

    /// Full extracted text, optionally carrying page-marker lines
    pub text: String,

    /// Content fingerprint of the full text
    pub fingerprint: Fingerprint,

    /// Unix timestamp (seconds) of ingestion
    pub ingested_at: u64,
}

impl Document {
    /// Create a document, computing its fingerprint
    pub fn new(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let fingerprint = Fingerprint::compute(&text);
        Self {
            source_id: source_id.into(),
            text,
            fingerprint,
            ingested_at: unix_now(),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
