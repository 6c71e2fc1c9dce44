//! Prompt construction for segment analysis

use presswatch_domain::{Segment, Taxonomy};

/// Builds the task instruction sent to the remote service for one segment
///
/// Pure function of the segment, its position, and the taxonomy: the same
/// inputs always render the same prompt.
pub struct PromptBuilder<'a> {
    segment: &'a Segment,
    taxonomy: &'a Taxonomy,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for one segment
    pub fn new(segment: &'a Segment, taxonomy: &'a Taxonomy) -> Self {
        Self { segment, taxonomy }
    }

    /// Render the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task instruction and record grammar
        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Position context for multi-segment documents
        if self.segment.total > 1 {
            prompt.push_str(&format!(
                "This is part {} of {} of a longer document. Describe only the \
                 complete articles in this part.\n\n",
                self.segment.index, self.segment.total
            ));
        }

        // 3. The taxonomy, highest tier first
        prompt.push_str("Priority tiers, highest first:\n\n");
        for group in self.taxonomy.groups() {
            prompt.push_str(&format!("{} ({}):\n", group.tier.label(), group.headline));
            for topic in &group.topics {
                prompt.push_str(&format!("- {}\n", topic));
            }
            prompt.push('\n');
        }

        // 4. The text to analyze
        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.segment.text);
        prompt.push_str("\n---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"Read the following newspaper text and list every distinct article it contains, scored against the priority tiers below.

For each article emit exactly one record in this line format:

TITLE: <headline>
PRIORITY: <highest | high | standard>
PAGE: <page reference, or "unknown">
SUMMARY: <1-2 sentence summary>
RELEVANCE: <one sentence on why this matters locally>
RATING: <optional urgency from 1 to 5>

Rules:
- Separate records with a line containing only "---"
- TITLE is mandatory; omit any other field you cannot fill
- PRIORITY must name one of the tiers below
- Do not invent articles; describe only what the text contains"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output only records in the line format above, separated by "---" lines.
No prose, no markdown fences, no explanations."#;
