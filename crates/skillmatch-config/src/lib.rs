//! # skillmatch-config
//!
//! Configuration for the skillmatch tools. Reads from `skillmatch.toml`, then
//! environment variables, then CLI overrides, in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::SkillmatchConfig;
pub use schema::{ConfigWarning, LoggingConfig, MatcherConfig, RegistryConfig, WarningSeverity};
