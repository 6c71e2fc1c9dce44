//! Priority tier module - relevance classes for extracted articles

/// Relevance class assigned to an extracted article record
///
/// Tiers form a fixed, closed, ordered set. `Highest` outranks `High`,
/// which outranks `Standard`. Records that match nothing in the taxonomy
/// fall to `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityTier {
    /// Act immediately (core local-politics beats)
    Highest,

    /// Important, worth a follow-up
    High,

    /// Monitor only
    Standard,
}

impl PriorityTier {
    /// All tiers in rank order, highest first
    pub const ALL: [PriorityTier; 3] = [
        PriorityTier::Highest,
        PriorityTier::High,
        PriorityTier::Standard,
    ];

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Highest => "highest",
            PriorityTier::High => "high",
            PriorityTier::Standard => "standard",
        }
    }

    /// Human-facing section label for report rendering
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::Highest => "HIGHEST PRIORITY",
            PriorityTier::High => "HIGH PRIORITY",
            PriorityTier::Standard => "STANDARD",
        }
    }

    /// Numeric rank, 0 = highest. Lower sorts first.
    pub fn rank(&self) -> usize {
        match self {
            PriorityTier::Highest => 0,
            PriorityTier::High => 1,
            PriorityTier::Standard => 2,
        }
    }

    /// The lowest tier, used as the classification default
    pub fn lowest() -> Self {
        PriorityTier::Standard
    }

    /// Parse a tier from free text
    ///
    /// Tolerant on purpose: the remote service echoes tier names back with
    /// varying decoration ("HIGHEST PRIORITY", "priority: high", ...).
    /// "highest" is checked before "high" because the former contains the
    /// latter.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        if s.contains("highest") || s.contains("höchste") {
            Some(PriorityTier::Highest)
        } else if s.contains("high") || s.contains("hohe") {
            Some(PriorityTier::High)
        } else if s.contains("standard") {
            Some(PriorityTier::Standard)
        } else {
            None
        }
    }
}

impl std::str::FromStr for PriorityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid priority tier: {}", s))
    }
}
