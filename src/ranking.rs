//! Ranking of blueprint candidates
//!
//! Candidates are ordered by total score, highest first. The sort is stable,
//! so candidates with equal totals keep their input order.

use serde::{Deserialize, Serialize};

use crate::explanation::Explanation;
use crate::scorer::ScoreResult;

/// A scored candidate in a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position in the candidate list as submitted
    pub option: usize,
    pub building_id: String,
    pub building_name: String,
    pub score: ScoreResult,
    pub explanation: Explanation,
}

/// Candidates ordered by total, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    candidates: Vec<RankedCandidate>,
}

impl Ranking {
    /// Sort candidates by total descending (stable)
    pub fn from_candidates(mut candidates: Vec<RankedCandidate>) -> Self {
        candidates.sort_by(|a, b| b.score.total.cmp(&a.score.total));
        Self { candidates }
    }

    /// Recommended candidate, `None` for an empty ranking
    pub fn winner(&self) -> Option<&RankedCandidate> {
        self.candidates.first()
    }

    /// Runs of two or more candidates sharing a total, in ranked order
    pub fn ties(&self) -> Vec<&[RankedCandidate]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for end in 1..=self.candidates.len() {
            let run_ends = end == self.candidates.len()
                || self.candidates[end].score.total != self.candidates[start].score.total;
            if run_ends {
                if end - start >= 2 {
                    groups.push(&self.candidates[start..end]);
                }
                start = end;
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedCandidate> {
        self.candidates.iter()
    }

    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<RankedCandidate> {
        self.candidates
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedCandidate;
    type IntoIter = std::slice::Iter<'a, RankedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScorerConfig;
    use crate::explanation::ExplanationGenerator;
    use crate::scorer::{BlueprintScorer, ScoreComponents, ScoringContext};

    fn candidate(option: usize, id: &str, total: f64) -> RankedCandidate {
        let score = ScoreResult::from_components(ScoreComponents {
            base: total,
            ..ScoreComponents::default()
        });
        RankedCandidate {
            option,
            building_id: id.to_string(),
            building_name: id.to_string(),
            explanation: ExplanationGenerator::generate_unknown(id, &score),
            score,
        }
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.iter().map(|c| c.building_id.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let ranking = Ranking::from_candidates(vec![
            candidate(1, "a", 70.0),
            candidate(2, "b", 90.0),
            candidate(3, "c", 70.0),
            candidate(4, "d", 90.0),
        ]);

        assert_eq!(ids(&ranking), vec!["b", "d", "a", "c"]);
        assert_eq!(ranking.winner().map(|c| c.option), Some(2));
    }

    #[test]
    fn test_ties() {
        let ranking = Ranking::from_candidates(vec![
            candidate(1, "a", 70.0),
            candidate(2, "b", 90.0),
            candidate(3, "c", 70.0),
            candidate(4, "e", 60.0),
        ]);

        let ties = ranking.ties();
        assert_eq!(ties.len(), 1);
        let tied: Vec<&str> = ties[0].iter().map(|c| c.building_id.as_str()).collect();
        assert_eq!(tied, vec!["a", "c"]);

        let no_ties = Ranking::from_candidates(vec![candidate(1, "a", 10.0), candidate(2, "b", 20.0)]);
        assert!(no_ties.ties().is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let scorer = BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap();
        let ranking = scorer.rank(&[], &ScoringContext::new("coral_forest")).unwrap();

        assert!(ranking.is_empty());
        assert!(ranking.winner().is_none());
        assert!(ranking.ties().is_empty());
    }

    #[test]
    fn test_rank_shortlist() {
        let scorer = BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap();
        let ctx = ScoringContext::new("cursed_royal_woodlands").with_species(["humans", "beavers", "lizards"]);
        let shortlist = vec![
            "tavern".to_string(),
            "lumber_mill".to_string(),
            "human_house".to_string(),
        ];

        let ranking = scorer.rank(&shortlist, &ctx).unwrap();

        // human_house: 50 + 30 + 35 = 115
        // lumber_mill: 50 + (15 + 0 - 15) + 25 + 8 = 83
        // tavern: 50 + 15 + 15 = 80
        assert_eq!(ids(&ranking), vec!["human_house", "lumber_mill", "tavern"]);
        let options: Vec<usize> = ranking.iter().map(|c| c.option).collect();
        assert_eq!(options, vec![3, 2, 1]);
        assert_eq!(ranking.winner().map(|c| c.score.total), Some(115));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scorer = BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap();
        let ctx = ScoringContext::new("scarlet_orchard")
            .with_species(["foxes", "harpies", "humans"])
            .with_current_buildings(["provisioner", "fox_house"]);
        let all: Vec<String> = scorer.catalog().buildings().iter().map(|b| b.id.clone()).collect();

        let sequential = scorer.rank(&all, &ctx).unwrap();
        let parallel = scorer.rank_parallel(&all, &ctx).unwrap();
        assert_eq!(sequential, parallel);
    }
}
