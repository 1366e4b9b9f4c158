#[cfg(test)]
mod tests {
    use clap::Parser;
    use skillmatch_cli::Cli;
    use skillmatch_core::SkillmatchError;
    use std::path::Path;

    const GOOD: &str = r#"{
        "description": "Design REST APIs",
        "triggers": {"high_confidence": ["design.*api"]},
        "capabilities": [{"keywords": ["rest", "api"], "solves": ["How do I design RESTful APIs?"]}]
    }"#;

    fn skill(root: &Path, rel: &str, metadata: &str) {
        let dir = root.join(rel);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("metadata.json"), metadata).unwrap();
    }

    /// Run the CLI against a registry with a config file that does not exist.
    fn run(root: &Path, args: &[&str]) -> skillmatch_core::Result<()> {
        let config = root.join("absent.toml");
        let mut argv = vec![
            "skillmatch",
            "-q",
            "--config",
            config.to_str().unwrap(),
            "--registry",
            root.to_str().unwrap(),
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().run()
    }

    #[test]
    fn test_validate_clean_registry_succeeds() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "development/api", GOOD);
        assert!(run(root.path(), &["validate"]).is_ok());
    }

    #[test]
    fn test_validate_failures_become_error() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "development/api", GOOD);
        skill(
            root.path(),
            "development/broken",
            r#"{"triggers": {"high_confidence": ["(unclosed"]}, "capabilities": [{"keywords": ["a"], "solves": ["b"]}]}"#,
        );
        let err = run(root.path(), &["validate", "--json"]).unwrap_err();
        assert!(matches!(
            err,
            SkillmatchError::ValidationFailed {
                skills: 1,
                failures: 1
            }
        ));
    }

    #[test]
    fn test_validate_with_categories_file() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "frontend/api", GOOD);
        let categories = root.path().join("categories.json");
        std::fs::write(&categories, r#"{"frontend": ["css", "html"]}"#).unwrap();

        let err = run(
            root.path(),
            &["validate", "--categories", categories.to_str().unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, SkillmatchError::ValidationFailed { .. }));

        let missing = root.path().join("missing.json");
        let err = run(
            root.path(),
            &["validate", "--categories", missing.to_str().unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, SkillmatchError::Other(_)));
    }

    #[test]
    fn test_match_named_skill() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "development/api", GOOD);
        assert!(run(root.path(), &["match", "design an api", "--skill", "api"]).is_ok());

        let err = run(root.path(), &["match", "design an api", "--skill", "nope"]).unwrap_err();
        assert!(matches!(err, SkillmatchError::NotFound { name } if name == "nope"));
    }

    #[test]
    fn test_match_whole_registry() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "development/api", GOOD);
        assert!(run(root.path(), &["match", "rest api docs", "--json"]).is_ok());
        assert!(run(root.path(), &["match", "nothing relevant", "--min-tier", "solves"]).is_ok());
    }

    #[test]
    fn test_show_and_list() {
        let root = tempfile::tempdir().unwrap();
        skill(root.path(), "development/api", GOOD);
        assert!(run(root.path(), &["list"]).is_ok());
        assert!(run(root.path(), &["show", "api"]).is_ok());
        assert!(matches!(
            run(root.path(), &["show", "ghost"]).unwrap_err(),
            SkillmatchError::NotFound { .. }
        ));
    }

    #[test]
    fn test_missing_registry_root_is_error() {
        let root = tempfile::tempdir().unwrap();
        let gone = root.path().join("gone");
        let config = root.path().join("absent.toml");
        let err = Cli::try_parse_from([
            "skillmatch",
            "-q",
            "--config",
            config.to_str().unwrap(),
            "--registry",
            gone.to_str().unwrap(),
            "list",
        ])
        .unwrap()
        .run()
        .unwrap_err();
        assert!(matches!(err, SkillmatchError::Registry(_)));
    }
}
