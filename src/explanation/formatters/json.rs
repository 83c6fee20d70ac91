use crate::ranking::Ranking;

/// JSON formatter for rankings
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format ranking as pretty-printed JSON
    pub fn format(ranking: &Ranking) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(ranking)
    }

    /// Format ranking as compact JSON (no whitespace)
    pub fn format_compact(ranking: &Ranking) -> Result<String, serde_json::Error> {
        serde_json::to_string(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScorerConfig;
    use crate::scorer::{BlueprintScorer, ScoringContext};

    fn ranking() -> Ranking {
        let scorer = BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap();
        let ctx = ScoringContext::new("cursed_royal_woodlands").with_species(["humans"]);
        scorer.rank(&["human_house".to_string()], &ctx).unwrap()
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&ranking()).unwrap();

        assert!(json.contains("\"building_id\": \"human_house\""));
        assert!(json.contains("\"total\": 115"));
        assert!(json.contains("\"tier\": \"Strong\""));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&ranking()).unwrap();

        assert!(!json.contains('\n'));
        assert!(json.contains("\"option\":1"));

        let parsed: Ranking = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ranking());
    }
}
