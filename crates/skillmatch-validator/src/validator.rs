use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use skillmatch_core::{SignalKind, SkillmatchError, TriggerTier};
use skillmatch_skills::{Skill, SkillRegistry, compile_pattern, extract_with};

use crate::report::{FailureKind, ValidationReport};

/// Checks every skill of a registry and collects all defects in one pass.
///
/// Skills are checked independently; one bad skill never stops the pass.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    /// Category → allowed terms. Categories absent from the map are not checked.
    categories: BTreeMap<String, Vec<String>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories(mut self, categories: BTreeMap<String, Vec<String>>) -> Self {
        self.categories = categories;
        self
    }

    /// Validate every skill in the registry.
    pub fn validate(&self, registry: &SkillRegistry) -> ValidationReport {
        // Skills sharing a name are keyed by `category/name` so each keeps its own entry.
        let duplicates = registry.duplicates();
        let results: Vec<(String, Vec<FailureKind>)> = registry
            .skills()
            .par_iter()
            .map(|skill| {
                let key = if duplicates.contains_key(&skill.name) {
                    skill.qualified_name()
                } else {
                    skill.name.clone()
                };
                (key, self.validate_skill(skill))
            })
            .collect();

        let mut report = ValidationReport {
            checked: results.len(),
            failures: BTreeMap::new(),
            duplicates: duplicates.clone(),
        };
        for (name, failures) in results {
            if failures.is_empty() {
                continue;
            }
            warn!(skill = %name, failures = failures.len(), "skill failed validation");
            report.failures.entry(name).or_default().extend(failures);
        }

        info!(
            checked = report.checked,
            failing = report.failures.len(),
            failures = report.failure_count(),
            "registry validation complete"
        );
        report
    }

    /// All defects of one skill, in check order.
    pub fn validate_skill(&self, skill: &Skill) -> Vec<FailureKind> {
        let mut failures = Vec::new();

        let metadata = match skill.metadata() {
            Ok(m) => m,
            Err(e) => {
                failures.push(malformed(e));
                return failures;
            }
        };

        match &metadata.triggers {
            None => failures.push(FailureKind::MissingTriggers),
            Some(triggers) => {
                if triggers.high_confidence.iter().all(|p| p.trim().is_empty()) {
                    failures.push(FailureKind::EmptySignal {
                        signal: SignalKind::HighConfidence,
                    });
                }
                for (tier, patterns) in [
                    (TriggerTier::HighConfidence, &triggers.high_confidence),
                    (TriggerTier::MediumConfidence, &triggers.medium_confidence),
                ] {
                    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
                        if let Err(SkillmatchError::InvalidPattern { pattern, reason }) =
                            compile_pattern(pattern)
                        {
                            failures.push(FailureKind::InvalidPattern {
                                tier,
                                pattern,
                                reason,
                            });
                        }
                    }
                }
            }
        }

        // Keyword, solves and category checks need a known dialect.
        let dialect = match skill.dialect() {
            Ok(d) => d,
            Err(e) => {
                failures.push(malformed(e));
                return failures;
            }
        };

        let signals = extract_with(metadata, dialect, skill.document());
        if signals.keywords.is_empty() {
            failures.push(FailureKind::EmptySignal {
                signal: SignalKind::Keywords,
            });
        }
        if signals.solves.is_empty() {
            failures.push(FailureKind::EmptySignal {
                signal: SignalKind::Solves,
            });
        }

        if let Some(category) = &skill.category {
            if let Some(allowed) = self.categories.get(category) {
                let text = std::iter::once(metadata.description.as_str())
                    .chain(signals.keywords.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase();
                let coherent = allowed
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .any(|t| !t.is_empty() && text.contains(&t));
                if !coherent {
                    failures.push(FailureKind::CategoryMismatch {
                        category: category.clone(),
                        allowed: allowed.clone(),
                    });
                }
            }
        }

        debug!(skill = %skill.name, dialect = dialect.as_str(), failures = failures.len(), "validated skill");
        failures
    }
}

fn malformed(err: SkillmatchError) -> FailureKind {
    let reason = match err {
        SkillmatchError::MalformedMetadata { reason, .. } => reason,
        other => other.to_string(),
    };
    FailureKind::MalformedMetadata { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillmatch_skills::SkillMetadata;

    fn skill(category: Option<&str>, metadata: &str, document: Option<&str>) -> Skill {
        Skill::from_parts(
            "api-design",
            category.map(str::to_string),
            SkillMetadata::parse(metadata),
            document.map(str::to_string),
        )
    }

    const VALID: &str = r#"{
        "description": "Design REST APIs",
        "triggers": {"high_confidence": ["design.*api"], "medium_confidence": ["endpoint"]},
        "capabilities": [{"keywords": ["rest"], "solves": ["How do I design an API?"]}]
    }"#;

    #[test]
    fn valid_skill_has_no_failures() {
        assert!(Validator::new().validate_skill(&skill(None, VALID, None)).is_empty());
    }

    #[test]
    fn malformed_metadata_stops_further_checks() {
        let failures = Validator::new().validate_skill(&skill(None, "{ not json", None));
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], FailureKind::MalformedMetadata { .. }));
    }

    #[test]
    fn missing_triggers_reported_once() {
        let failures = Validator::new().validate_skill(&skill(
            None,
            r#"{"capabilities": [{"keywords": ["a"], "solves": ["b"]}]}"#,
            None,
        ));
        assert_eq!(failures, vec![FailureKind::MissingTriggers]);
    }

    #[test]
    fn empty_high_confidence_is_an_empty_signal() {
        let failures = Validator::new().validate_skill(&skill(
            None,
            r#"{"triggers": {"high_confidence": []}, "capabilities": [{"keywords": ["a"], "solves": ["b"]}]}"#,
            None,
        ));
        assert_eq!(
            failures,
            vec![FailureKind::EmptySignal {
                signal: SignalKind::HighConfidence
            }]
        );
    }

    #[test]
    fn invalid_patterns_in_both_tiers() {
        let failures = Validator::new().validate_skill(&skill(
            None,
            r#"{"triggers": {"high_confidence": ["ok", "(unclosed"], "medium_confidence": ["[z-a]"]},
               "capabilities": [{"keywords": ["a"], "solves": ["b"]}]}"#,
            None,
        ));
        assert_eq!(failures.len(), 2);
        assert!(matches!(
            &failures[0],
            FailureKind::InvalidPattern { tier: TriggerTier::HighConfidence, pattern, .. } if pattern == "(unclosed"
        ));
        assert!(matches!(
            &failures[1],
            FailureKind::InvalidPattern { tier: TriggerTier::MediumConfidence, .. }
        ));
    }

    #[test]
    fn slim_skill_without_markers_lacks_keywords_and_solves() {
        let failures = Validator::new().validate_skill(&skill(
            None,
            r#"{"triggers": {"high_confidence": ["x"]}, "capabilities": ["a"]}"#,
            Some("# No markers"),
        ));
        assert_eq!(
            failures,
            vec![
                FailureKind::EmptySignal {
                    signal: SignalKind::Keywords
                },
                FailureKind::EmptySignal {
                    signal: SignalKind::Solves
                },
            ]
        );
    }

    #[test]
    fn unknown_dialect_is_malformed() {
        let failures = Validator::new().validate_skill(&skill(
            None,
            r#"{"triggers": {"high_confidence": ["x"]}}"#,
            None,
        ));
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], FailureKind::MalformedMetadata { .. }));
    }

    #[test]
    fn category_coherence_uses_description_and_keywords() {
        let mut categories = BTreeMap::new();
        categories.insert("development".to_string(), vec!["API".to_string()]);
        categories.insert("design".to_string(), vec!["css".to_string(), "layout".to_string()]);
        let validator = Validator::new().with_categories(categories);

        assert!(validator.validate_skill(&skill(Some("development"), VALID, None)).is_empty());

        let failures = validator.validate_skill(&skill(Some("design"), VALID, None));
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0],
            FailureKind::CategoryMismatch { category, .. } if category == "design"
        ));

        // categories missing from the map are not checked
        assert!(validator.validate_skill(&skill(Some("ops"), VALID, None)).is_empty());
    }
}
