#[cfg(test)]
mod tests {
    use skillmatch_core::*;
    use std::path::PathBuf;

    // ── Tier tests ─────────────────────────────────────────────

    #[test]
    fn test_tier_serde_lowercase() {
        let json = serde_json::to_string(&Tier::Keyword).unwrap();
        assert_eq!(json, "\"keyword\"");
        let restored: Tier = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(restored, Tier::High);
    }

    #[test]
    fn test_tier_display_matches_parse() {
        for tier in [Tier::None, Tier::Solves, Tier::Keyword, Tier::Medium, Tier::High] {
            assert_eq!(tier.to_string().parse::<Tier>().unwrap(), tier);
        }
    }

    // ── MatchResult tests ──────────────────────────────────────

    #[test]
    fn test_match_result_hit_sets_matched() {
        let r = MatchResult::hit(Tier::High, 1, vec!["design.*api".into()]);
        assert!(r.matched);
        assert_eq!(r.tier, Tier::High);
        assert_eq!(r.evidence, vec!["design.*api"]);
    }

    #[test]
    fn test_match_result_json_omits_empty_evidence() {
        let json = serde_json::to_value(MatchResult::none()).unwrap();
        assert_eq!(json["matched"], false);
        assert_eq!(json["tier"], "none");
        assert!(json.get("evidence").is_none());
    }

    // ── Error tests ────────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = SkillmatchError::NotFound {
            name: "api-design".into(),
        };
        assert_eq!(err.to_string(), "skill not found: api-design");

        let err = SkillmatchError::MalformedMetadata {
            path: PathBuf::from("/skills/api-design/metadata.json"),
            reason: "expected value".into(),
        };
        assert!(err.to_string().contains("/skills/api-design/metadata.json"));
    }

    #[test]
    fn test_empty_signal_display() {
        let err = SkillmatchError::EmptySignal {
            skill: "caching".into(),
            signal: SignalKind::Keywords,
        };
        assert_eq!(err.to_string(), "skill 'caching' has no keywords");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SkillmatchError = io.into();
        assert!(matches!(err, SkillmatchError::Io(_)));
    }
}
