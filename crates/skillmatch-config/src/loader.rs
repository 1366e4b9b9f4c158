use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::SkillmatchConfig;

/// Loads and reloads the skillmatch configuration.
pub struct ConfigLoader {
    config: Arc<RwLock<SkillmatchConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLMATCH_CONFIG env > ~/.skillmatch/skillmatch.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLMATCH_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillmatch")
            .join("skillmatch.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> skillmatch_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            Self::read(&config_path)?
        } else {
            if path.is_some() {
                warn!(?config_path, "config file not found, using defaults");
            }
            SkillmatchConfig::default()
        };

        let config = Self::apply_env_overrides(config);
        Self::check(&config)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Wrap an in-memory config (no file behind it).
    pub fn from_config(config: SkillmatchConfig) -> skillmatch_core::Result<Self> {
        Self::check(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path: PathBuf::new(),
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> SkillmatchConfig {
        self.config.read().clone()
    }

    /// Get a shared reference to the live config.
    pub fn shared(&self) -> Arc<RwLock<SkillmatchConfig>> {
        Arc::clone(&self.config)
    }

    /// Path the config was resolved from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Reload the config from disk.
    pub fn reload(&self) -> skillmatch_core::Result<()> {
        if !self.config_path.exists() {
            return Err(skillmatch_core::SkillmatchError::Config(format!(
                "config file not found: {}",
                self.config_path.display()
            )));
        }
        let new_config = Self::apply_env_overrides(Self::read(&self.config_path)?);
        Self::check(&new_config)?;
        *self.config.write() = new_config;
        info!("configuration reloaded");
        Ok(())
    }

    fn read(path: &Path) -> skillmatch_core::Result<SkillmatchConfig> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str::<SkillmatchConfig>(&raw).map_err(|e| {
            skillmatch_core::SkillmatchError::Config(format!(
                "failed to parse {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Log warnings, fail on errors.
    fn check(config: &SkillmatchConfig) -> skillmatch_core::Result<()> {
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
                Ok(())
            }
            Err(e) => Err(skillmatch_core::SkillmatchError::Config(e)),
        }
    }

    /// Apply env var overrides (SKILLMATCH_REGISTRY, SKILLMATCH_KEYWORD_THRESHOLD, SKILLMATCH_LOG_LEVEL).
    fn apply_env_overrides(mut config: SkillmatchConfig) -> SkillmatchConfig {
        if let Ok(v) = std::env::var("SKILLMATCH_REGISTRY") {
            config.registry.root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SKILLMATCH_KEYWORD_THRESHOLD") {
            match v.parse::<usize>() {
                Ok(threshold) => config.matcher.keyword_threshold = threshold,
                Err(e) => warn!(value = %v, error = %e, "ignoring SKILLMATCH_KEYWORD_THRESHOLD"),
            }
        }
        if let Ok(v) = std::env::var("SKILLMATCH_LOG_LEVEL") {
            config.logging.level = v;
        }
        config
    }
}
