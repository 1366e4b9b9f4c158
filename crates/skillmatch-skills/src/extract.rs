//! Signal extraction: one flat shape for both schema dialects.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use skillmatch_core::{Result, SkillmatchError, TriggerTier};

use crate::definition::{Dialect, Skill, SkillMetadata};

const KEYWORDS_MARKER: &str = "**Keywords:**";
const SOLVES_MARKER: &str = "**Solves:**";

/// The discoverability signals of a skill, independent of dialect.
///
/// Strings are trimmed and deduplicated with case preserved. Trigger lists keep
/// their authored order; keywords and solves are ordered sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedSignals {
    pub high_confidence: Vec<String>,
    pub medium_confidence: Vec<String>,
    pub keywords: BTreeSet<String>,
    pub solves: BTreeSet<String>,
}

impl ExtractedSignals {
    pub fn patterns(&self, tier: TriggerTier) -> &[String] {
        match tier {
            TriggerTier::HighConfidence => &self.high_confidence,
            TriggerTier::MediumConfidence => &self.medium_confidence,
        }
    }
}

/// Extract the signals of a loaded skill.
///
/// Missing or malformed metadata yields empty signals rather than an error;
/// the validator is responsible for reporting it.
pub fn extract(skill: &Skill) -> ExtractedSignals {
    let metadata = match skill.metadata() {
        Ok(m) => m,
        Err(e) => {
            debug!(skill = %skill.name, error = %e, "no signals: metadata unavailable");
            return ExtractedSignals::default();
        }
    };
    match skill.dialect() {
        Ok(dialect) => extract_with(metadata, dialect, skill.document()),
        Err(e) => {
            debug!(skill = %skill.name, error = %e, "no capability signals: dialect unknown");
            ExtractedSignals {
                high_confidence: high_patterns(metadata),
                medium_confidence: medium_patterns(metadata),
                ..Default::default()
            }
        }
    }
}

/// Extract signals from parsed metadata and, for slim skills, the prose document.
pub fn extract_with(
    metadata: &SkillMetadata,
    dialect: &Dialect,
    document: Option<&str>,
) -> ExtractedSignals {
    let (keywords, solves) = match dialect {
        Dialect::Legacy(capabilities) => (
            normalize_set(capabilities.iter().flat_map(|c| c.keywords.iter())),
            normalize_set(capabilities.iter().flat_map(|c| c.solves.iter())),
        ),
        Dialect::Slim(_) => {
            let doc = document.unwrap_or("");
            (keyword_markers(doc), solves_markers(doc))
        }
    };

    ExtractedSignals {
        high_confidence: high_patterns(metadata),
        medium_confidence: medium_patterns(metadata),
        keywords,
        solves,
    }
}

fn high_patterns(metadata: &SkillMetadata) -> Vec<String> {
    metadata
        .triggers
        .as_ref()
        .map(|t| normalize_list(&t.high_confidence))
        .unwrap_or_default()
}

fn medium_patterns(metadata: &SkillMetadata) -> Vec<String> {
    metadata
        .triggers
        .as_ref()
        .map(|t| normalize_list(&t.medium_confidence))
        .unwrap_or_default()
}

/// Collect every `**Keywords:** a, b, c` line of a prose document.
pub fn keyword_markers(document: &str) -> BTreeSet<String> {
    let mut keywords = BTreeSet::new();
    for line in document.lines() {
        if let Some(list) = line.trim().strip_prefix(KEYWORDS_MARKER) {
            keywords.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string),
            );
        }
    }
    keywords
}

/// Collect the bullets that follow each `**Solves:**` marker, up to the next heading.
pub fn solves_markers(document: &str) -> BTreeSet<String> {
    let mut solves = BTreeSet::new();
    let mut in_block = false;

    for line in document.lines() {
        let line = line.trim();
        if let Some(inline) = line.strip_prefix(SOLVES_MARKER) {
            in_block = true;
            push_statement(&mut solves, inline);
        } else if line.starts_with('#') {
            in_block = false;
        } else if in_block {
            if let Some(bullet) = line.strip_prefix("- ") {
                push_statement(&mut solves, bullet);
            }
        }
    }
    solves
}

fn push_statement(solves: &mut BTreeSet<String>, raw: &str) {
    let statement = unquote(raw.trim());
    if !statement.is_empty() {
        solves.insert(statement.to_string());
    }
}

fn unquote(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].trim()
    } else {
        s
    }
}

fn normalize_list(items: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    items
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && seen.insert(*p))
        .map(str::to_string)
        .collect()
}

fn normalize_set<'a>(items: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    items
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trigger patterns compiled for matching, each kept with its source text.
/// Patterns that do not compile are left out; the validator reports them.
#[derive(Debug, Clone, Default)]
pub struct CompiledTriggers {
    pub high_confidence: Vec<(String, Regex)>,
    pub medium_confidence: Vec<(String, Regex)>,
}

impl CompiledTriggers {
    pub fn compile(signals: &ExtractedSignals) -> Self {
        Self {
            high_confidence: compile_all(&signals.high_confidence, TriggerTier::HighConfidence),
            medium_confidence: compile_all(&signals.medium_confidence, TriggerTier::MediumConfidence),
        }
    }

    pub fn patterns(&self, tier: TriggerTier) -> &[(String, Regex)] {
        match tier {
            TriggerTier::HighConfidence => &self.high_confidence,
            TriggerTier::MediumConfidence => &self.medium_confidence,
        }
    }
}

fn compile_all(patterns: &[String], tier: TriggerTier) -> Vec<(String, Regex)> {
    patterns
        .iter()
        .filter_map(|pattern| match compile_pattern(pattern) {
            Ok(re) => Some((pattern.clone(), re)),
            Err(e) => {
                debug!(%tier, error = %e, "skipping invalid trigger pattern");
                None
            }
        })
        .collect()
}

/// Compile a trigger pattern for case-insensitive search.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SkillmatchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
