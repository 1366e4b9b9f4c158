//! # skillmatch-cli
//!
//! Command-line interface for skill matching and registry validation.
//!
//! ## Commands
//!
//! - `skillmatch match <query>`: match a query against one skill or the whole registry
//! - `skillmatch validate`: check every skill and exit non-zero on any failure
//! - `skillmatch list`: list discovered skills
//! - `skillmatch show <name>`: show a skill's dialect and extracted signals
//! - `skillmatch config`: show the effective configuration

pub mod commands;

pub use commands::Cli;
