//! Text segmentation for long documents
//!
//! Carves raw text into bounded segments, preferring structural breaks
//! (paragraph breaks, page-marker lines, sentence ends) over fixed-width
//! cuts. A window that contains no recognized break point is cut at the
//! size limit; the cut is moved back to the nearest character boundary so
//! multi-byte characters are never split, which means a run with no break
//! point at all is split at the limit rather than emitted oversized.
//! Deterministic and side-effect free.

use presswatch_domain::Segment;

/// Default tokens recognized in page-marker lines
pub const DEFAULT_MARKER_TOKENS: &[&str] = &["SEITE", "PAGE"];

/// Carves document text into ordered, bounded segments
pub struct Segmenter {
    max_chunk_size: usize,
    marker_tokens: Vec<String>,
}

impl Segmenter {
    /// Create a segmenter with the given size limit (bytes)
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            // a zero limit would stall the cursor
            max_chunk_size: max_chunk_size.max(1),
            marker_tokens: DEFAULT_MARKER_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// Replace the page-marker tokens
    pub fn with_marker_tokens(mut self, tokens: Vec<String>) -> Self {
        self.marker_tokens = tokens;
        self
    }

    /// Split text into ordered segments of at most `max_chunk_size` bytes
    ///
    /// Pieces that trim to empty are dropped without stalling the cursor,
    /// so no empty segments are ever produced and every iteration advances
    /// by at least one byte.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let mut pieces = Vec::new();

        if text.len() <= self.max_chunk_size {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed.to_string());
            }
        } else {
            let mut cursor = 0;
            while cursor < text.len() {
                let end = self.carve_end(text, cursor);
                let piece = text[cursor..end].trim();
                if !piece.is_empty() {
                    pieces.push(piece.to_string());
                }
                cursor = end;
            }
        }

        let total = pieces.len();
        pieces
            .into_iter()
            .enumerate()
            .map(|(i, text)| Segment {
                text,
                index: i + 1,
                total,
            })
            .collect()
    }

    /// End of the next carve, always strictly past `cursor`
    ///
    /// Break-point priority inside the window: paragraph break, page-marker
    /// line, sentence terminator, then a cut at the window end.
    fn carve_end(&self, text: &str, cursor: usize) -> usize {
        let hard_limit = cursor + self.max_chunk_size;
        if hard_limit >= text.len() {
            return text.len();
        }

        // Move the window end onto a character boundary. When the limit is
        // smaller than the character under it, widen to the next boundary
        // instead so the cursor still advances.
        let mut window_end = hard_limit;
        while window_end > cursor && !text.is_char_boundary(window_end) {
            window_end -= 1;
        }
        if window_end == cursor {
            window_end = hard_limit;
            while window_end < text.len() && !text.is_char_boundary(window_end) {
                window_end += 1;
            }
        }

        let window = &text[cursor..window_end];

        if let Some(pos) = window.rfind("\n\n") {
            if pos > 0 {
                return cursor + pos;
            }
        }
        if let Some(pos) = self.last_marker_line(window) {
            if pos > 0 {
                return cursor + pos;
            }
        }
        if let Some(pos) = window.rfind(['.', '!', '?']) {
            if pos + 1 < window.len() {
                return cursor + pos + 1;
            }
        }
        window_end
    }

    /// Byte offset of the start of the last page-marker line in `window`
    ///
    /// A marker line carries one of the configured tokens and starts with
    /// `=` or `[` decoration ("=== SEITE 3 ===", "[PAGE 2]"), so body text
    /// that merely mentions a token does not split the page.
    fn last_marker_line(&self, window: &str) -> Option<usize> {
        let mut best = None;
        let mut offset = 0;
        for line in window.split_inclusive('\n') {
            let trimmed = line.trim_start();
            if (trimmed.starts_with('=') || trimmed.starts_with('['))
                && self.marker_tokens.iter().any(|t| line.contains(t.as_str()))
            {
                best = Some(offset);
            }
            offset += line.len();
        }
        best
    }
}
