use std::path::PathBuf;

use thiserror::Error;

use crate::types::SignalKind;

/// Unified error type for the skillmatch workspace.
#[derive(Error, Debug)]
pub enum SkillmatchError {
    // ── Registry errors ────────────────────────────────────────
    #[error("skill not found: {name}")]
    NotFound { name: String },

    #[error("registry error: {0}")]
    Registry(String),

    // ── Skill definition errors ────────────────────────────────
    #[error("malformed metadata at {}: {reason}", path.display())]
    MalformedMetadata { path: PathBuf, reason: String },

    #[error("invalid trigger pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("skill '{skill}' has no {signal}")]
    EmptySignal { skill: String, signal: SignalKind },

    // ── Validation ─────────────────────────────────────────────
    #[error("registry validation failed: {failures} failure(s) across {skills} skill(s)")]
    ValidationFailed { skills: usize, failures: usize },

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SkillmatchError>;
