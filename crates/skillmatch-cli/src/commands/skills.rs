use skillmatch_config::SkillmatchConfig;
use skillmatch_core::SkillmatchError;

use super::load_registry;

pub(super) fn cmd_list(config: &SkillmatchConfig) -> skillmatch_core::Result<()> {
    let registry = load_registry(config)?;
    let skills = registry.list();
    if skills.is_empty() {
        println!("No skills found in {}", registry.root().display());
        return Ok(());
    }

    println!("\x1b[1mAvailable Skills ({}):\x1b[0m\n", skills.len());
    for s in skills {
        let category = s
            .category
            .as_deref()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        let dialect = s.dialect().map(|d| d.as_str()).unwrap_or("malformed");
        println!("  \x1b[36m{}\x1b[0m{category} ({dialect})", s.name);
        if !s.description().is_empty() {
            println!("    {}", s.description());
        }
    }
    Ok(())
}

pub(super) fn cmd_show(
    config: &SkillmatchConfig,
    name: &str,
    json: bool,
) -> skillmatch_core::Result<()> {
    let registry = load_registry(config)?;
    let skill = registry
        .resolve(name)
        .ok_or_else(|| SkillmatchError::NotFound {
            name: name.to_string(),
        })?;
    let signals = skill.signals();

    if json {
        println!("{}", serde_json::to_string_pretty(&signals)?);
        return Ok(());
    }

    println!("\x1b[1m{}\x1b[0m", skill.name);
    if !skill.description().is_empty() {
        println!("  {}", skill.description());
    }
    if let Some(category) = &skill.category {
        println!("  Category: {category}");
    }
    match skill.dialect() {
        Ok(d) => println!("  Dialect: {}", d.as_str()),
        Err(e) => println!("  \x1b[31m{e}\x1b[0m"),
    }
    println!("  Directory: {}", skill.dir.display());

    let sections: [(&str, Vec<&String>); 4] = [
        ("High-confidence triggers", signals.high_confidence.iter().collect()),
        ("Medium-confidence triggers", signals.medium_confidence.iter().collect()),
        ("Keywords", signals.keywords.iter().collect()),
        ("Solves", signals.solves.iter().collect()),
    ];
    for (title, items) in sections {
        println!("\n  \x1b[1m{title} ({}):\x1b[0m", items.len());
        for item in items {
            println!("    {item}");
        }
    }

    if let Some(paths) = registry.duplicates().get(&skill.name) {
        println!(
            "\n  ⚠️  {} directories share this name; showing the first.",
            paths.len()
        );
    }
    Ok(())
}
