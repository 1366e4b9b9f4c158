#[cfg(test)]
mod tests {
    use skillmatch_skills::{Dialect, ExtractedSignals, RegistryLayout, SkillRegistry, extract};
    use std::path::Path;

    fn write(root: &Path, rel: &str, file: &str, content: &str) {
        let dir = root.join(rel);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_snapshot_survives_file_changes() {
        let root = tempfile::tempdir().unwrap();
        write(
            root.path(),
            "ops/deploy",
            "metadata.json",
            r#"{"description": "Deploy services", "triggers": {"high_confidence": ["deploy"]}, "capabilities": ["rollout"]}"#,
        );
        write(
            root.path(),
            "ops/deploy",
            "SKILL.md",
            "## rollout\n**Keywords:** canary, rollback\n**Solves:** \"How do I roll back a bad deploy?\"\n",
        );

        let reg = SkillRegistry::load(root.path(), RegistryLayout::default()).unwrap();
        std::fs::remove_dir_all(root.path().join("ops")).unwrap();

        let skill = reg.resolve("deploy").unwrap();
        assert!(matches!(skill.dialect().unwrap(), Dialect::Slim(caps) if caps == &["rollout"]));
        let signals = extract(skill);
        assert_eq!(signals.high_confidence, vec!["deploy"]);
        assert!(signals.keywords.contains("canary"));
        assert!(signals.keywords.contains("rollback"));
        assert!(signals.solves.contains("How do I roll back a bad deploy?"));
    }

    #[test]
    fn test_mixed_registry_loads_every_skill() {
        let root = tempfile::tempdir().unwrap();
        write(
            root.path(),
            "development/legacy",
            "metadata.json",
            r#"{"description": "Legacy", "triggers": {"high_confidence": ["legacy"]},
                "capabilities": [{"name": "one", "keywords": [" cache ", "cache"], "solves": ["Why?"]}]}"#,
        );
        write(root.path(), "development/broken", "metadata.json", "not json");
        write(root.path(), "notes", "SKILL.md", "# Prose only");

        let reg = SkillRegistry::load(root.path(), RegistryLayout::default()).unwrap();
        assert_eq!(reg.count(), 3);

        let legacy = extract(reg.resolve("legacy").unwrap());
        assert_eq!(legacy.keywords.len(), 1);
        assert!(legacy.keywords.contains("cache"));

        assert_eq!(extract(reg.resolve("broken").unwrap()), ExtractedSignals::default());
        assert!(reg.resolve("notes").unwrap().metadata().is_err());
        assert!(reg.duplicates().is_empty());
    }
}
