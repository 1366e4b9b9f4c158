//! # skillmatch-skills
//!
//! The registry side of skill discovery. A registry is a directory tree of
//! skill directories, optionally nested under category folders:
//!
//! ```text
//! skills/
//! ├── development/
//! │   └── api-design/
//! │       ├── metadata.json   # description, triggers, capabilities
//! │       └── SKILL.md        # prose; slim skills carry their signals here
//! └── caching/
//!     └── metadata.json
//! ```
//!
//! ## Dialects
//!
//! The shape of `capabilities` in `metadata.json` decides the dialect:
//!
//! - **legacy**: `[{"keywords": [...], "solves": [...]}, ...]`
//! - **slim**: `["capability-name", ...]`, with `**Keywords:** a, b` lines and
//!   `**Solves:**` bullet blocks in `SKILL.md`
//!
//! [`extract`] turns either dialect into the same [`ExtractedSignals`], so
//! matching and validation never look at the dialect again.

pub mod definition;
pub mod extract;
pub mod registry;

pub use definition::{CapabilityObject, Dialect, Skill, SkillMetadata, TriggerSet};
pub use extract::{CompiledTriggers, ExtractedSignals, compile_pattern, extract, extract_with};
pub use registry::{RegistryLayout, SkillRegistry};
