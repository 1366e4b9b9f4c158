use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

use skillmatch_config::SkillmatchConfig;
use skillmatch_validator::{ValidationReport, Validator};

use super::load_registry;

pub(super) fn cmd_validate(
    config: SkillmatchConfig,
    categories: Option<&Path>,
    json: bool,
) -> skillmatch_core::Result<()> {
    let categories = match categories {
        Some(path) => load_categories(path)?,
        None => config.categories.clone(),
    };
    let registry = load_registry(&config)?;
    let report = Validator::new()
        .with_categories(categories)
        .validate(&registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    report.into_result().map(|_| ())
}

/// Read a JSON object of category -> allowed terms.
fn load_categories(path: &Path) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read categories file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid categories file {}", path.display()))
}

fn print_report(report: &ValidationReport) {
    for (name, paths) in &report.duplicates {
        println!("  ⚠️  duplicate skill name '{name}':");
        for p in paths {
            println!("      {}", p.display());
        }
    }

    for (name, failures) in &report.failures {
        println!("  \x1b[31m✗\x1b[0m \x1b[36m{name}\x1b[0m");
        for f in failures {
            println!("      {f}");
        }
    }

    if !report.failures.is_empty() || !report.duplicates.is_empty() {
        println!();
    }
    println!(
        "  ✅ {} passed, ❌ {} failed ({} failures), ⚠️  {} duplicate names",
        report.passed(),
        report.failures.len(),
        report.failure_count(),
        report.duplicates.len()
    );
}
