//! # skillmatch-validator
//!
//! Walks a whole registry and reports every structural defect in one pass:
//! unparseable metadata, missing or empty trigger lists, trigger patterns the
//! regex engine rejects, empty keyword or solves sets, and skills whose text
//! does not fit their category.

pub mod report;
pub mod validator;

pub use report::{FailureKind, ValidationReport};
pub use validator::Validator;
