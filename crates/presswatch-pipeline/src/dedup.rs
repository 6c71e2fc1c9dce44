//! Document-level dedup gate
//!
//! Gates entry to the pipeline before segmentation: a document whose
//! fingerprint was seen before is reported as a duplicate and not
//! re-analyzed. The gate is the only shared mutable state across
//! documents; check-then-insert happens under a single lock so two
//! concurrent submissions of the same fingerprint admit exactly one.

use presswatch_domain::{Document, Fingerprint};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// Set of already-processed document fingerprints
#[derive(Debug, Default)]
pub struct DedupGate {
    seen: Mutex<HashSet<Fingerprint>>,
}

impl DedupGate {
    /// Create an empty gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate seeded with previously processed fingerprints
    pub fn with_seen(fingerprints: impl IntoIterator<Item = Fingerprint>) -> Self {
        Self {
            seen: Mutex::new(fingerprints.into_iter().collect()),
        }
    }

    /// Read-only check: has this document been seen before?
    ///
    /// Does not modify the set; calling it twice without an intervening
    /// [`record_seen`](Self::record_seen) returns the same answer.
    pub fn should_process(&self, document: &Document) -> bool {
        !self.seen.lock().unwrap().contains(&document.fingerprint)
    }

    /// Mark a document's fingerprint as processed
    pub fn record_seen(&self, document: &Document) {
        self.seen.lock().unwrap().insert(document.fingerprint.clone());
    }

    /// Atomic check-then-insert
    ///
    /// Returns true when the document was admitted (and is now recorded),
    /// false when its fingerprint was already present. Callers that want
    /// to force reprocessing bypass the gate explicitly instead of calling
    /// this.
    pub fn claim(&self, document: &Document) -> bool {
        let admitted = self
            .seen
            .lock()
            .unwrap()
            .insert(document.fingerprint.clone());
        if !admitted {
            debug!(
                "Duplicate document '{}' ({})",
                document.source_id, document.fingerprint
            );
        }
        admitted
    }

    /// Number of recorded fingerprints
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// True when no fingerprint has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_should_process_is_idempotent() {
        let gate = DedupGate::new();
        let doc = Document::new("a.pdf", "text of a");

        assert!(gate.should_process(&doc));
        assert!(gate.should_process(&doc));
    }

    #[test]
    fn test_record_seen_flips_the_answer() {
        let gate = DedupGate::new();
        let doc = Document::new("a.pdf", "text of a");

        assert!(gate.should_process(&doc));
        gate.record_seen(&doc);
        assert!(!gate.should_process(&doc));
    }

    #[test]
    fn test_claim_admits_exactly_once() {
        let gate = DedupGate::new();
        let doc = Document::new("a.pdf", "text of a");

        assert!(gate.claim(&doc));
        assert!(!gate.claim(&doc));
    }

    #[test]
    fn test_same_text_different_source_is_still_duplicate() {
        let gate = DedupGate::new();
        let first = Document::new("a.pdf", "identical text");
        let second = Document::new("b.pdf", "identical text");

        assert!(gate.claim(&first));
        assert!(!gate.claim(&second));
    }

    #[test]
    fn test_seeded_gate() {
        let doc = Document::new("a.pdf", "archived text");
        let gate = DedupGate::with_seen([doc.fingerprint.clone()]);

        assert!(!gate.should_process(&doc));
        assert_eq!(gate.len(), 1);
    }

    #[test]
    fn test_concurrent_claims_admit_one() {
        let gate = Arc::new(DedupGate::new());
        let doc = Document::new("a.pdf", "contested text");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = Arc::clone(&gate);
            let doc = doc.clone();
            handles.push(std::thread::spawn(move || gate.claim(&doc)));
        }

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&admitted| admitted)
            .count();
        assert_eq!(admitted, 1);
    }
}
