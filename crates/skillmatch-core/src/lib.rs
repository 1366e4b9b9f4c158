//! # skillmatch-core
//!
//! Core types shared by every crate in the workspace: the unified error type,
//! match tiers and match verdicts.

pub mod error;
pub mod types;

pub use error::{Result, SkillmatchError};
pub use types::*;
