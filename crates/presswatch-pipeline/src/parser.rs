//! Tolerant parsing of remote-service replies into article records
//!
//! The reply is untrusted free text that usually follows the record
//! grammar the prompt asked for. Parsing never fails: fragments that lack
//! the mandatory title are dropped, unknown lines are folded into the
//! preceding field, and completely malformed input yields an empty set.

use presswatch_domain::{ArticleRecord, PriorityTier, Taxonomy, UNKNOWN_PAGE};
use tracing::debug;

/// One field in the record grammar
struct FieldSpec {
    label: &'static str,
    required: bool,
}

// Field order mirrors the prompt's record format; positions are used as
// value slots below.
const GRAMMAR: &[FieldSpec] = &[
    FieldSpec { label: "TITLE", required: true },
    FieldSpec { label: "PRIORITY", required: false },
    FieldSpec { label: "PAGE", required: false },
    FieldSpec { label: "SUMMARY", required: false },
    FieldSpec { label: "RELEVANCE", required: false },
    FieldSpec { label: "RATING", required: false },
];

const TITLE: usize = 0;
const PRIORITY: usize = 1;
const PAGE: usize = 2;
const SUMMARY: usize = 3;
const RELEVANCE: usize = 4;
const RATING: usize = 5;

/// Extract article records from a raw service reply
///
/// Returns an empty vec for input that contains no parseable record;
/// never panics or errors on malformed text.
pub fn parse(raw: &str, segment_index: usize, taxonomy: &Taxonomy) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    for fragment in split_records(raw) {
        if let Some(record) = parse_fragment(&fragment, segment_index, taxonomy) {
            records.push(record);
        } else if !fragment.trim().is_empty() {
            debug!(
                "Discarding fragment without a title ({} chars)",
                fragment.len()
            );
        }
    }
    records
}

/// Split a reply into record-candidate fragments at separator lines
fn split_records(raw: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    for line in raw.lines() {
        if is_separator(line) {
            fragments.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    fragments.push(current);
    fragments
}

/// A separator is a line of three or more dashes, possibly padded
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Parse one fragment into a record, or None if the title is missing
fn parse_fragment(
    fragment: &str,
    segment_index: usize,
    taxonomy: &Taxonomy,
) -> Option<ArticleRecord> {
    let mut values: Vec<Option<String>> = vec![None; GRAMMAR.len()];
    let mut last_field: Option<usize> = None;

    for line in fragment.lines() {
        let stripped = strip_decoration(line);
        if stripped.is_empty() {
            last_field = None;
            continue;
        }
        match match_field(stripped) {
            Some((idx, value)) => {
                if values[idx].is_none() {
                    values[idx] = Some(value.to_string());
                    last_field = Some(idx);
                } else {
                    // repeated label: first occurrence wins
                    last_field = None;
                }
            }
            None => {
                // unlabeled line: continuation of the previous field
                if let Some(idx) = last_field {
                    if let Some(value) = &mut values[idx] {
                        value.push(' ');
                        value.push_str(stripped);
                    }
                }
            }
        }
    }

    for (idx, spec) in GRAMMAR.iter().enumerate() {
        if spec.required && values[idx].as_deref().map_or(true, |v| v.is_empty()) {
            return None;
        }
    }

    let title = values[TITLE].take().unwrap_or_default();
    let summary = values[SUMMARY].take().unwrap_or_default();
    let explicit_tier = values[PRIORITY]
        .take()
        .and_then(|v| PriorityTier::parse(&v));
    let priority = explicit_tier
        .unwrap_or_else(|| taxonomy.classify(&format!("{} {}", title, summary)));

    Some(ArticleRecord {
        title,
        priority,
        page: values[PAGE]
            .take()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| UNKNOWN_PAGE.to_string()),
        summary,
        relevance: values[RELEVANCE].take().unwrap_or_default(),
        rating: values[RATING].take().and_then(|v| parse_rating(&v)),
        segment_index,
    })
}

/// Strip leading markdown decoration and surrounding whitespace
fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '*' | '#' | '>' | '-' | '•')
    })
    .trim_end()
}

/// Match a line against the grammar's field labels
///
/// A field is recognized only when its label prefix is present literally
/// (case-insensitive) and followed by a colon.
fn match_field(line: &str) -> Option<(usize, &str)> {
    for (idx, spec) in GRAMMAR.iter().enumerate() {
        let Some(prefix) = line.get(..spec.label.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(spec.label) {
            continue;
        }
        let rest = line[spec.label.len()..].trim_start();
        let Some(value) = rest.strip_prefix(':') else {
            continue;
        };
        return Some((idx, value.trim_start_matches(['*', ' ']).trim()));
    }
    None
}

/// Parse a 1-5 rating from free text; anything else is None
fn parse_rating(value: &str) -> Option<u8> {
    let digit = value.chars().find(|c| c.is_ascii_digit())?;
    let n = digit.to_digit(10)? as u8;
    (1..=5).contains(&n).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(raw: &str) -> Vec<ArticleRecord> {
        parse(raw, 1, &Taxonomy::default())
    }

    #[test]
    fn test_parse_well_formed_records() {
        let raw = "TITLE: Council approves budget\n\
                   PRIORITY: highest\n\
                   PAGE: 3\n\
                   SUMMARY: The council approved next year's budget.\n\
                   RELEVANCE: Core local politics.\n\
                   ---\n\
                   TITLE: Spring concert announced\n\
                   PRIORITY: standard\n\
                   SUMMARY: The choir plays in May.\n";

        let records = parse_one(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Council approves budget");
        assert_eq!(records[0].priority, PriorityTier::Highest);
        assert_eq!(records[0].page, "3");
        assert_eq!(records[1].title, "Spring concert announced");
        assert_eq!(records[1].page, UNKNOWN_PAGE);
        assert_eq!(records[1].segment_index, 1);
    }

    #[test]
    fn test_fragment_without_title_is_discarded() {
        let raw = "PRIORITY: high\nSUMMARY: Orphaned summary.\n\
                   ---\n\
                   TITLE: Kept article\nSUMMARY: Still here.";
        let records = parse_one(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept article");
    }

    #[test]
    fn test_tier_fallback_by_keyword() {
        let raw = "TITLE: Town council vote\nSUMMARY: The vote passed.\n\
                   ---\n\
                   TITLE: Cultural event announcement\nSUMMARY: Open air stage.";
        let records = parse_one(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].priority, PriorityTier::Highest);
        assert_eq!(records[1].priority, PriorityTier::Standard);
    }

    #[test]
    fn test_unmatched_record_falls_to_lowest_tier() {
        let records = parse_one("TITLE: Something entirely unrelated");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, PriorityTier::lowest());
    }

    #[test]
    fn test_explicit_tier_beats_keywords() {
        // title says "council" (highest keyword) but the service labeled it
        let records = parse_one("TITLE: Council gossip column\nPRIORITY: standard");
        assert_eq!(records[0].priority, PriorityTier::Standard);
    }

    #[test]
    fn test_markdown_decorated_labels() {
        let raw = "**TITLE:** Decorated headline\n\
                   - PRIORITY: high\n\
                   ## PAGE: 7";
        let records = parse_one(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Decorated headline");
        assert_eq!(records[0].priority, PriorityTier::High);
        assert_eq!(records[0].page, "7");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let records = parse_one("title: lower case works\npriority: HIGH");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, PriorityTier::High);
    }

    #[test]
    fn test_continuation_lines_extend_previous_field() {
        let raw = "TITLE: Wrapped headline\n\
                   SUMMARY: First half of the summary\n\
                   that wrapped onto a second line.";
        let records = parse_one(raw);
        assert_eq!(
            records[0].summary,
            "First half of the summary that wrapped onto a second line."
        );
    }

    #[test]
    fn test_repeated_label_first_wins() {
        let raw = "TITLE: First title\nTITLE: Second title";
        let records = parse_one(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "First title");
    }

    #[test]
    fn test_rating_parsing() {
        assert_eq!(parse_one("TITLE: t\nRATING: 4")[0].rating, Some(4));
        assert_eq!(parse_one("TITLE: t\nRATING: 4/5")[0].rating, Some(4));
        assert_eq!(parse_one("TITLE: t\nRATING: 9")[0].rating, None);
        assert_eq!(parse_one("TITLE: t\nRATING: none")[0].rating, None);
        assert_eq!(parse_one("TITLE: t")[0].rating, None);
    }

    #[test]
    fn test_separator_variants() {
        let raw = "TITLE: One\n-----\nTITLE: Two\n  ---  \nTITLE: Three";
        let records = parse_one(raw);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_garbage_yields_empty() {
        assert!(parse_one("").is_empty());
        assert!(parse_one("\u{0}\u{1}\u{2} random \u{fffd} bytes").is_empty());
        assert!(parse_one("Plain prose with no field labels at all.").is_empty());
        assert!(parse_one("---\n---\n---").is_empty());
    }

    #[test]
    fn test_segment_index_is_carried() {
        let records = parse("TITLE: t", 7, &Taxonomy::default());
        assert_eq!(records[0].segment_index, 7);
    }
}
