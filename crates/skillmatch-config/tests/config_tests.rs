#[cfg(test)]
mod tests {
    use skillmatch_config::ConfigLoader;
    use skillmatch_config::schema::*;
    use skillmatch_core::Tier;
    use std::io::Write;

    // ── Default tests ──────────────────────────────────────────

    #[test]
    fn test_registry_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.root, std::path::PathBuf::from("skills"));
        assert_eq!(config.metadata_file, "metadata.json");
        assert_eq!(config.document_file, "SKILL.md");
    }

    #[test]
    fn test_matcher_config_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.keyword_threshold, 2);
        assert_eq!(config.solves_threshold, 2);
        assert_eq!(config.min_term_length, 4);
        assert_eq!(config.registry_min_tier, Tier::Keyword);
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, "pretty");
    }

    // ── TOML tests ─────────────────────────────────────────────

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = SkillmatchConfig::default();
        config
            .categories
            .insert("development".into(), vec!["api".into(), "code".into()]);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: SkillmatchConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored.registry.root, config.registry.root);
        assert_eq!(restored.matcher.keyword_threshold, 2);
        assert_eq!(restored.categories["development"], vec!["api", "code"]);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml_str = r#"
[matcher]
keyword_threshold = 3
registry_min_tier = "medium"

[categories]
"development/api" = ["api", "rest", "endpoint"]
"#;
        let config: SkillmatchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.matcher.keyword_threshold, 3);
        assert_eq!(config.matcher.registry_min_tier, Tier::Medium);
        assert_eq!(config.matcher.solves_threshold, 2);
        assert_eq!(config.registry.document_file, "SKILL.md");
        assert_eq!(config.categories["development/api"].len(), 3);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let toml_str = "[matcher]\nregistry_min_tier = \"fuzzy\"\n";
        assert!(toml::from_str::<SkillmatchConfig>(toml_str).is_err());
    }

    // ── ConfigLoader tests ─────────────────────────────────────

    #[test]
    fn test_config_loader_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("skillmatch.toml");
        let mut f = std::fs::File::create(&config_path).unwrap();
        writeln!(
            f,
            r#"
[registry]
root = "/srv/plugin/skills"
metadata_file = "skill.json"

[matcher]
solves_threshold = 3

[logging]
format = "json"
"#
        )
        .unwrap();

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        let config = loader.get();
        assert_eq!(config.registry.metadata_file, "skill.json");
        assert_eq!(config.matcher.solves_threshold, 3);
        assert_eq!(config.logging.format, "json");
        assert_eq!(loader.path(), config_path.as_path());
    }

    #[test]
    fn test_config_loader_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loader.get().matcher.min_term_length, 4);
    }

    #[test]
    fn test_config_loader_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("skillmatch.toml");
        std::fs::write(&config_path, "[matcher]\nmin_term_length = 0\n").unwrap();
        assert!(ConfigLoader::load(Some(config_path.as_path())).is_err());
    }

    #[test]
    fn test_config_loader_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("skillmatch.toml");
        std::fs::write(&config_path, "[matcher\nkeyword_threshold = ").unwrap();
        let err = ConfigLoader::load(Some(config_path.as_path())).err().unwrap();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_config_loader_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("skillmatch.toml");
        std::fs::write(&config_path, "[matcher]\nsolves_threshold = 3\n").unwrap();

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        assert_eq!(loader.get().matcher.solves_threshold, 3);

        std::fs::write(&config_path, "[matcher]\nsolves_threshold = 4\n").unwrap();
        loader.reload().unwrap();
        assert_eq!(loader.get().matcher.solves_threshold, 4);
        assert_eq!(loader.shared().read().matcher.solves_threshold, 4);
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = SkillmatchConfig::default();
        config.matcher.solves_threshold = 0;
        assert!(ConfigLoader::from_config(config).is_err());
    }
}
