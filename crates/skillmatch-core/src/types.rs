use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence tier of a match verdict.
///
/// Ordered weakest to strongest, so `tier >= Tier::Keyword` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    None,
    Solves,
    Keyword,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Solves => "solves",
            Tier::Keyword => "keyword",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Tier::None),
            "solves" => Ok(Tier::Solves),
            "keyword" => Ok(Tier::Keyword),
            "medium" => Ok(Tier::Medium),
            "high" => Ok(Tier::High),
            other => Err(format!(
                "unknown tier '{other}' (expected none, solves, keyword, medium, high)"
            )),
        }
    }
}

/// The two trigger-pattern lists of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTier {
    HighConfidence,
    MediumConfidence,
}

impl fmt::Display for TriggerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerTier::HighConfidence => f.write_str("high_confidence"),
            TriggerTier::MediumConfidence => f.write_str("medium_confidence"),
        }
    }
}

/// A discoverability signal that must be non-empty for every skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    HighConfidence,
    Keywords,
    Solves,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::HighConfidence => f.write_str("high_confidence triggers"),
            SignalKind::Keywords => f.write_str("keywords"),
            SignalKind::Solves => f.write_str("solves statements"),
        }
    }
}

/// Verdict of matching one query against one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    pub tier: Tier,
    /// Keyword hits or overlapping terms; 1 for a regex hit, 0 when unmatched.
    pub hits: usize,
    /// What produced the verdict: the pattern, the keywords, or the statement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl MatchResult {
    /// The "no match" verdict.
    pub fn none() -> Self {
        Self {
            matched: false,
            tier: Tier::None,
            hits: 0,
            evidence: Vec::new(),
        }
    }

    pub fn hit(tier: Tier, hits: usize, evidence: Vec<String>) -> Self {
        Self {
            matched: tier != Tier::None,
            tier,
            hits,
            evidence,
        }
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::none()
    }
}
