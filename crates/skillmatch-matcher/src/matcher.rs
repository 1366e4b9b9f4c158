use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

use skillmatch_core::{MatchResult, Tier, TriggerTier};
use skillmatch_skills::{CompiledTriggers, ExtractedSignals, Skill, SkillRegistry};

use crate::text::{contains_phrase, fold, terms};

/// Evaluates the tiered match algorithm.
///
/// Tiers are tried strongest first and the first success wins:
/// high-confidence regex, medium-confidence regex, keyword overlap,
/// solves-statement overlap. Matching is pure: the same query and signals
/// always give the same verdict.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    keyword_threshold: usize,
    solves_threshold: usize,
    min_term_length: usize,
}

/// A skill's verdict from a whole-registry pass.
#[derive(Debug, Clone, Serialize)]
pub struct SkillMatch {
    pub skill: String,
    pub category: Option<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillMatcher {
    pub const fn new() -> Self {
        Self {
            keyword_threshold: 2,
            solves_threshold: 2,
            min_term_length: 4,
        }
    }

    /// Minimum whole-word keyword hits for the keyword tier (at least 1).
    #[must_use]
    pub fn with_keyword_threshold(mut self, threshold: usize) -> Self {
        self.keyword_threshold = threshold.max(1);
        self
    }

    /// Minimum query terms inside one solves statement (at least 1).
    #[must_use]
    pub fn with_solves_threshold(mut self, threshold: usize) -> Self {
        self.solves_threshold = threshold.max(1);
        self
    }

    /// Minimum query-term length for solves overlap.
    #[must_use]
    pub fn with_min_term_length(mut self, len: usize) -> Self {
        self.min_term_length = len.max(1);
        self
    }

    /// Match a query against one skill's extracted signals.
    ///
    /// Trigger patterns are compiled for this call only; use [`Self::match_skill`]
    /// to reuse a skill's compiled patterns across queries.
    pub fn match_signals(&self, query: &str, signals: &ExtractedSignals) -> MatchResult {
        self.evaluate(query, signals, &CompiledTriggers::compile(signals))
    }

    /// Match a query against a skill's cached signals and compiled patterns.
    pub fn match_skill(&self, query: &str, skill: &Skill) -> MatchResult {
        self.evaluate(query, skill.signals(), skill.triggers())
    }

    /// Match a query against a single named skill. `None` when the name does not resolve.
    pub fn match_named(
        &self,
        query: &str,
        registry: &SkillRegistry,
        name: &str,
    ) -> Option<SkillMatch> {
        let skill = registry.resolve(name)?;
        Some(SkillMatch {
            skill: skill.name.clone(),
            category: skill.category.clone(),
            result: self.match_skill(query, skill),
        })
    }

    /// Match a query against every skill and keep verdicts at or above `min_tier`.
    ///
    /// Results are ordered strongest tier first, then by hit count, then by name.
    pub fn match_registry(
        &self,
        query: &str,
        registry: &SkillRegistry,
        min_tier: Tier,
    ) -> Vec<SkillMatch> {
        let mut matches: Vec<SkillMatch> = registry
            .skills()
            .par_iter()
            .map(|skill| SkillMatch {
                skill: skill.name.clone(),
                category: skill.category.clone(),
                result: self.match_skill(query, skill),
            })
            .filter(|m| m.result.matched && m.result.tier >= min_tier)
            .collect();

        matches.sort_by(|a, b| {
            b.result
                .tier
                .cmp(&a.result.tier)
                .then_with(|| b.result.hits.cmp(&a.result.hits))
                .then_with(|| a.skill.cmp(&b.skill))
        });

        info!(
            skills = registry.count(),
            matched = matches.len(),
            min_tier = %min_tier,
            "registry match complete"
        );
        matches
    }

    fn evaluate(
        &self,
        query: &str,
        signals: &ExtractedSignals,
        triggers: &CompiledTriggers,
    ) -> MatchResult {
        if query.trim().is_empty() {
            return MatchResult::none();
        }

        // Regex tiers see the query lower-cased but otherwise untouched.
        let lowered = query.to_lowercase();
        if let Some(pattern) = Self::regex_hit(&lowered, triggers, TriggerTier::HighConfidence) {
            return MatchResult::hit(Tier::High, 1, vec![pattern]);
        }
        if let Some(pattern) = Self::regex_hit(&lowered, triggers, TriggerTier::MediumConfidence) {
            return MatchResult::hit(Tier::Medium, 1, vec![pattern]);
        }

        let folded = fold(query);

        // Case variants of one keyword count once.
        let mut seen = BTreeSet::new();
        let keywords: Vec<String> = signals
            .keywords
            .iter()
            .filter(|k| {
                let key = fold(k);
                contains_phrase(&folded, &key) && seen.insert(key)
            })
            .cloned()
            .collect();
        if keywords.len() >= self.keyword_threshold {
            return MatchResult::hit(Tier::Keyword, keywords.len(), keywords);
        }

        if let Some((statement, overlap)) = self.best_statement(&folded, signals) {
            if overlap >= self.solves_threshold {
                return MatchResult::hit(Tier::Solves, overlap, vec![statement.to_string()]);
            }
        }

        MatchResult::none()
    }

    /// First pattern of the tier that finds the query.
    fn regex_hit(query: &str, triggers: &CompiledTriggers, tier: TriggerTier) -> Option<String> {
        triggers
            .patterns(tier)
            .iter()
            .find(|(_, re)| re.is_match(query))
            .map(|(pattern, _)| pattern.clone())
    }

    /// The solves statement sharing the most query terms, with that count.
    fn best_statement<'a>(
        &self,
        query: &str,
        signals: &'a ExtractedSignals,
    ) -> Option<(&'a str, usize)> {
        let query_terms = terms(query, self.min_term_length);
        if query_terms.is_empty() {
            return None;
        }

        let mut best: Option<(&str, usize)> = None;
        for statement in &signals.solves {
            let folded = fold(statement);
            let overlap = query_terms
                .iter()
                .filter(|t| contains_phrase(&folded, t))
                .count();
            if overlap > best.map_or(0, |(_, n)| n) {
                best = Some((statement.as_str(), overlap));
            }
        }
        best
    }
}
