//! # skillmatch-matcher
//!
//! Decides which skill(s) a free-text query should activate. Each verdict
//! carries a confidence tier: `High` and `Medium` come from trigger regexes,
//! `Keyword` from whole-word keyword overlap, `Solves` from term overlap with
//! a single example question.

pub mod matcher;
pub mod text;

pub use matcher::{SkillMatch, SkillMatcher};
