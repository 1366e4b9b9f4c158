use skillmatch_config::SkillmatchConfig;
use skillmatch_core::{SkillmatchError, Tier};
use skillmatch_matcher::SkillMatch;

use super::{build_matcher, load_registry};

pub(super) fn cmd_match(
    config: &SkillmatchConfig,
    query: &str,
    skill: Option<&str>,
    min_tier: Tier,
    json: bool,
) -> skillmatch_core::Result<()> {
    let registry = load_registry(config)?;
    let matcher = build_matcher(config);

    if let Some(name) = skill {
        let verdict = matcher
            .match_named(query, &registry, name)
            .ok_or_else(|| SkillmatchError::NotFound {
                name: name.to_string(),
            })?;
        if json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            print_match(&verdict);
        }
        return Ok(());
    }

    let matches = matcher.match_registry(query, &registry, min_tier);
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!(
            "No skill matched at tier {min_tier} or above ({} skills checked).",
            registry.count()
        );
        return Ok(());
    }

    println!("\x1b[1mMatches ({}):\x1b[0m\n", matches.len());
    for m in &matches {
        print_match(m);
    }
    Ok(())
}

fn print_match(m: &SkillMatch) {
    let category = m
        .category
        .as_deref()
        .map(|c| format!(" \x1b[90m[{c}]\x1b[0m"))
        .unwrap_or_default();
    if !m.result.matched {
        println!("  \x1b[36m{}\x1b[0m{category}  no match", m.skill);
        return;
    }

    let color = match m.result.tier {
        Tier::High => "\x1b[32m",
        Tier::Medium => "\x1b[33m",
        _ => "\x1b[37m",
    };
    println!(
        "  \x1b[36m{}\x1b[0m{category}  {color}{}\x1b[0m ({} hit{})",
        m.skill,
        m.result.tier,
        m.result.hits,
        if m.result.hits == 1 { "" } else { "s" }
    );
    for e in &m.result.evidence {
        println!("    \x1b[90m{e}\x1b[0m");
    }
}
