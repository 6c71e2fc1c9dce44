//! Topical taxonomy - per-tier topic lists and the keyword fallback classifier

use crate::tier::PriorityTier;

/// Topics and fallback keywords for a single priority tier
#[derive(Debug, Clone)]
pub struct TopicGroup {
    /// Tier this group belongs to
    pub tier: PriorityTier,

    /// One-line description of the tier, shown in prompts and reports
    pub headline: String,

    /// Topic descriptions embedded verbatim into prompts
    pub topics: Vec<String>,

    /// Lowercase keywords for fallback classification of unlabeled records
    pub keywords: Vec<String>,
}

/// The fixed topical taxonomy the pipeline scores articles against
///
/// A taxonomy holds one `TopicGroup` per tier, kept in rank order. It is an
/// explicit value passed into the prompt builder and the parser at
/// construction time, never a process-wide singleton.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    groups: Vec<TopicGroup>,
}

impl Taxonomy {
    /// Create a taxonomy from topic groups
    ///
    /// Groups are ordered by tier rank; keywords are lowercased so
    /// classification is a plain substring check.
    pub fn new(mut groups: Vec<TopicGroup>) -> Self {
        groups.sort_by_key(|g| g.tier.rank());
        for group in &mut groups {
            for keyword in &mut group.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        Self { groups }
    }

    /// All topic groups in rank order, highest tier first
    pub fn groups(&self) -> &[TopicGroup] {
        &self.groups
    }

    /// The topic group for a tier, if the taxonomy defines one
    pub fn group_for(&self, tier: PriorityTier) -> Option<&TopicGroup> {
        self.groups.iter().find(|g| g.tier == tier)
    }

    /// Every fallback keyword across all tiers
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.keywords.iter().map(String::as_str))
    }

    /// Keyword fallback classification
    ///
    /// Matches the text against each tier's keyword list in rank order;
    /// the first tier with a hit wins. No hit falls to the lowest tier.
    /// This is a documented heuristic for records the remote service left
    /// unlabeled, not the primary classification mechanism.
    pub fn classify(&self, text: &str) -> PriorityTier {
        let haystack = text.to_lowercase();
        for group in &self.groups {
            if group.keywords.iter().any(|k| haystack.contains(k.as_str())) {
                return group.tier;
            }
        }
        PriorityTier::lowest()
    }
}

impl Default for Taxonomy {
    /// The local-newspaper taxonomy: three tiers, twelve topics
    fn default() -> Self {
        Self::new(vec![
            TopicGroup {
                tier: PriorityTier::Highest,
                headline: "Act immediately".to_string(),
                topics: vec![
                    "Local politics (city council, mayor, local elections)".to_string(),
                    "Business & commerce (company settlements, jobs, start-ups)".to_string(),
                    "Education (schools, universities, digital classrooms)".to_string(),
                    "Transport & infrastructure (public transit, cycle paths, roads)".to_string(),
                ],
                keywords: vec![
                    "council".to_string(),
                    "mayor".to_string(),
                    "election".to_string(),
                    "business".to_string(),
                    "commerce".to_string(),
                    "start-up".to_string(),
                    "jobs".to_string(),
                    "school".to_string(),
                    "education".to_string(),
                    "university".to_string(),
                    "transit".to_string(),
                    "infrastructure".to_string(),
                    "road".to_string(),
                ],
            },
            TopicGroup {
                tier: PriorityTier::High,
                headline: "Important".to_string(),
                topics: vec![
                    "Digitalisation & innovation".to_string(),
                    "Environment & sustainability (pragmatic solutions)".to_string(),
                    "Civic participation & democracy".to_string(),
                    "Youth topics".to_string(),
                ],
                keywords: vec![
                    "digital".to_string(),
                    "innovation".to_string(),
                    "environment".to_string(),
                    "sustainab".to_string(),
                    "climate".to_string(),
                    "participation".to_string(),
                    "democracy".to_string(),
                    "youth".to_string(),
                ],
            },
            TopicGroup {
                tier: PriorityTier::Standard,
                headline: "Monitor".to_string(),
                topics: vec![
                    "Culture & events".to_string(),
                    "Sports".to_string(),
                    "Social affairs".to_string(),
                    "Miscellaneous".to_string(),
                ],
                keywords: vec![
                    "culture".to_string(),
                    "cultural".to_string(),
                    "event".to_string(),
                    "sport".to_string(),
                    "social".to_string(),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_covers_all_tiers() {
        let taxonomy = Taxonomy::default();
        for tier in PriorityTier::ALL {
            assert!(taxonomy.group_for(tier).is_some());
        }
        assert_eq!(taxonomy.groups()[0].tier, PriorityTier::Highest);
    }

    #[test]
    fn test_classify_first_match_in_rank_order() {
        let taxonomy = Taxonomy::default();
        // "council" hits the highest tier even though "event" also appears
        let tier = taxonomy.classify("Council debates the summer event schedule");
        assert_eq!(tier, PriorityTier::Highest);
    }

    #[test]
    fn test_classify_case_insensitive() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.classify("MAYOR re-elected"), PriorityTier::Highest);
        assert_eq!(taxonomy.classify("Youth club opens"), PriorityTier::High);
    }

    #[test]
    fn test_classify_falls_to_lowest() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            taxonomy.classify("Weather stays mild this week"),
            PriorityTier::lowest()
        );
    }

    #[test]
    fn test_keywords_lowercased_on_construction() {
        let taxonomy = Taxonomy::new(vec![TopicGroup {
            tier: PriorityTier::High,
            headline: "test".to_string(),
            topics: vec![],
            keywords: vec!["RoBoTiCs".to_string()],
        }]);
        assert_eq!(taxonomy.classify("new robotics lab"), PriorityTier::High);
    }

    #[test]
    fn test_custom_group_order_normalized() {
        let taxonomy = Taxonomy::new(vec![
            TopicGroup {
                tier: PriorityTier::Standard,
                headline: "low".to_string(),
                topics: vec![],
                keywords: vec!["shared".to_string()],
            },
            TopicGroup {
                tier: PriorityTier::Highest,
                headline: "top".to_string(),
                topics: vec![],
                keywords: vec!["shared".to_string()],
            },
        ]);
        // Both tiers match; the highest tier must win after reordering
        assert_eq!(taxonomy.classify("shared keyword"), PriorityTier::Highest);
    }
}
