use serde::{Deserialize, Serialize};
use skillmatch_core::Tier;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration, mapped from `skillmatch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillmatchConfig {
    pub registry: RegistryConfig,
    pub matcher: MatcherConfig,
    /// Category → allowed terms, used by the category coherence check.
    pub categories: BTreeMap<String, Vec<String>>,
    pub logging: LoggingConfig,
}

// ── Registry ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry root. Skills may be nested under any number of category folders.
    pub root: PathBuf,
    /// JSON metadata file inside each skill directory.
    pub metadata_file: String,
    /// Prose document inside each skill directory (carries slim-dialect markers).
    pub document_file: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("skills"),
            metadata_file: "metadata.json".into(),
            document_file: "SKILL.md".into(),
        }
    }
}

// ── Matcher ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Whole-word keyword hits needed for the keyword tier.
    pub keyword_threshold: usize,
    /// Query terms that must appear in a single solves statement.
    pub solves_threshold: usize,
    /// Minimum length (in chars) of a query term for solves overlap.
    pub min_term_length: usize,
    /// Lowest tier reported when matching against the whole registry.
    pub registry_min_tier: Tier,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            keyword_threshold: 2,
            solves_threshold: 2,
            min_term_length: 4,
            registry_min_tier: Tier::Keyword,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl SkillmatchConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Registry file names ───
        for (field, value) in [
            ("registry.metadata_file", &self.registry.metadata_file),
            ("registry.document_file", &self.registry.document_file),
        ] {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    field: field.into(),
                    message: "file name is empty".into(),
                    severity: WarningSeverity::Error,
                    hint: None,
                });
            } else if value.contains('/') || value.contains('\\') {
                warnings.push(ConfigWarning {
                    field: field.into(),
                    message: format!("'{}' must be a bare file name", value),
                    severity: WarningSeverity::Error,
                    hint: Some("The file is looked up inside each skill directory".into()),
                });
            }
        }

        // ── Thresholds ───
        if self.matcher.keyword_threshold == 0 {
            warnings.push(ConfigWarning {
                field: "matcher.keyword_threshold".into(),
                message: "threshold 0 would match every skill at keyword tier".into(),
                severity: WarningSeverity::Error,
                hint: Some("Use 2 (the default) or higher".into()),
            });
        } else if self.matcher.keyword_threshold == 1 {
            warnings.push(ConfigWarning {
                field: "matcher.keyword_threshold".into(),
                message: "a single common word will reach keyword tier".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Use 2 (the default) to require corroboration".into()),
            });
        }

        if self.matcher.solves_threshold == 0 {
            warnings.push(ConfigWarning {
                field: "matcher.solves_threshold".into(),
                message: "threshold 0 would match every skill with a solves statement".into(),
                severity: WarningSeverity::Error,
                hint: Some("Use 2 (the default) or higher".into()),
            });
        }

        if self.matcher.min_term_length == 0 {
            warnings.push(ConfigWarning {
                field: "matcher.min_term_length".into(),
                message: "term length must be at least 1".into(),
                severity: WarningSeverity::Error,
                hint: Some("Use 4 (the default) to skip short filler words".into()),
            });
        }

        if self.matcher.registry_min_tier == Tier::None {
            warnings.push(ConfigWarning {
                field: "matcher.registry_min_tier".into(),
                message: "tier 'none' reports every skill in the registry".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Valid values: solves, keyword, medium, high".into()),
            });
        }

        // ── Categories ───
        for (category, terms) in &self.categories {
            if terms.iter().all(|t| t.trim().is_empty()) {
                warnings.push(ConfigWarning {
                    field: format!("categories.{}", category),
                    message: "no allowed terms; every skill in it will fail coherence".into(),
                    severity: WarningSeverity::Warning,
                    hint: None,
                });
            }
        }

        // ── Logging ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
