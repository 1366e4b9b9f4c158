use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use skillmatch_core::{SignalKind, SkillmatchError, TriggerTier};

/// One structural defect of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Metadata file missing, unreadable, unparseable, or without a
    /// recognizable `capabilities` shape.
    MalformedMetadata { reason: String },
    /// No `triggers` object.
    MissingTriggers,
    /// A trigger pattern the regex engine rejects.
    InvalidPattern {
        tier: TriggerTier,
        pattern: String,
        reason: String,
    },
    /// A required signal set is empty after extraction.
    EmptySignal { signal: SignalKind },
    /// Neither the description nor the keywords mention an allowed term.
    CategoryMismatch {
        category: String,
        allowed: Vec<String>,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MalformedMetadata { reason } => write!(f, "malformed metadata: {reason}"),
            FailureKind::MissingTriggers => write!(f, "triggers object missing"),
            FailureKind::InvalidPattern {
                tier,
                pattern,
                reason,
            } => {
                let summary = reason.lines().last().unwrap_or(reason).trim();
                write!(f, "invalid {tier} pattern '{pattern}': {summary}")
            }
            FailureKind::EmptySignal { signal } => write!(f, "no {signal}"),
            FailureKind::CategoryMismatch { category, allowed } => write!(
                f,
                "nothing in description or keywords fits category '{category}' (expected one of: {})",
                allowed.join(", ")
            ),
        }
    }
}

/// Outcome of a validation pass over a whole registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of skills checked.
    pub checked: usize,
    /// Failing skills only, keyed by name. Skills whose name is shared with
    /// another directory are keyed by `category/name` instead.
    pub failures: BTreeMap<String, Vec<FailureKind>>,
    /// Names carried by more than one directory. Reported, not failed.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub duplicates: BTreeMap<String, Vec<PathBuf>>,
}

impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Skills with no failures.
    pub fn passed(&self) -> usize {
        self.checked.saturating_sub(self.failures.len())
    }

    /// Total failures across all skills.
    pub fn failure_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    pub fn failures_for(&self, skill: &str) -> &[FailureKind] {
        self.failures.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Err(ValidationFailed)` when any skill failed, for exit-status use.
    pub fn into_result(self) -> skillmatch_core::Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SkillmatchError::ValidationFailed {
                skills: self.failures.len(),
                failures: self.failure_count(),
            })
        }
    }
}
