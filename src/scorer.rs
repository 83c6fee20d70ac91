//! Blueprint Scorer - Main coordinator for scoring blueprint candidates
//!
//! Combines the score components into a `ScoreResult` and drives ranking and
//! explanation. Includes both sequential and parallel (Rayon) batch paths.
//!
//! Scoring is a pure function of the catalog and the `ScoringContext`; the
//! scorer holds no mutable state and can be shared across threads.

use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::{LookupPolicy, ScorerConfig};
use crate::data::{Biome, Building, Catalog};
use crate::error::{CatalogError, ScoringError};
use crate::explanation::{Explanation, ExplanationGenerator};
use crate::metrics::{
    calculate_biome_compatibility, calculate_category_bonus, calculate_species_synergy, BASE_SCORE,
};
use crate::ranking::{RankedCandidate, Ranking};
use crate::utils::round_half_up;

/// Selected species (the game allows three)
pub type SpeciesSelection = SmallVec<[String; 3]>;

/// Shared inputs of a calculation: biome, species and what is already built
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    pub biome_id: String,
    #[serde(default)]
    pub species_ids: SpeciesSelection,
    #[serde(default)]
    pub current_building_ids: Vec<String>,
}

impl ScoringContext {
    pub fn new(biome_id: impl Into<String>) -> Self {
        Self {
            biome_id: biome_id.into(),
            ..Self::default()
        }
    }

    pub fn with_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species_ids = species.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_current_buildings<I, S>(mut self, buildings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current_building_ids = buildings.into_iter().map(Into::into).collect();
        self
    }
}

/// Named score components
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub base: f64,
    pub species: f64,
    pub category: f64,
    /// Negative under scarcity penalties
    pub biome: f64,
    pub synergy: f64,
}

impl ScoreComponents {
    pub fn sum(&self) -> f64 {
        self.base + self.species + self.category + self.biome + self.synergy
    }
}

/// Blueprint score result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum of components, rounded half-up
    pub total: i64,
    pub components: ScoreComponents,
}

impl ScoreResult {
    /// Score of an unresolved building (all zero)
    pub fn empty() -> Self {
        Self::from_components(ScoreComponents::default())
    }

    pub fn from_components(components: ScoreComponents) -> Self {
        Self {
            total: round_half_up(components.sum()),
            components,
        }
    }
}

/// Context ids resolved against the catalog once per calculation
struct ResolvedContext<'a> {
    biome: Option<&'a Biome>,
    current: Vec<&'a Building>,
}

/// Main blueprint scorer
pub struct BlueprintScorer {
    catalog: Arc<Catalog>,
    config: ScorerConfig,
}

impl BlueprintScorer {
    pub fn new(catalog: Arc<Catalog>, config: ScorerConfig) -> Self {
        Self { catalog, config }
    }

    /// Scorer over the embedded catalog
    pub fn with_embedded_catalog(config: ScorerConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(Catalog::embedded()?), config))
    }

    /// Scorer over `config.catalog_path`, or the embedded catalog when unset
    pub fn from_config(config: ScorerConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!("Loading catalog: {:?}", path);
                Catalog::load(path)?
            }
            None => Catalog::embedded()?,
        };
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    fn is_strict(&self) -> bool {
        self.config.lookup_policy == LookupPolicy::Strict
    }

    /// Score one building
    ///
    /// Lenient mode: an unknown building scores `ScoreResult::empty()`, an
    /// unknown biome contributes 0, unknown species and built ids are ignored.
    /// Strict mode: any of those is a `ScoringError`.
    pub fn score(&self, building_id: &str, ctx: &ScoringContext) -> Result<ScoreResult, ScoringError> {
        let resolved = self.resolve_context(ctx)?;
        self.score_resolved(building_id, ctx, &resolved)
    }

    /// Score several buildings in parallel; results follow input order
    pub fn score_batch(
        &self,
        building_ids: &[String],
        ctx: &ScoringContext,
    ) -> Result<Vec<ScoreResult>, ScoringError> {
        let resolved = self.resolve_context(ctx)?;
        building_ids
            .par_iter()
            .map(|id| self.score_resolved(id, ctx, &resolved))
            .collect()
    }

    /// Explain one building: detail string, breakdown lines and tier
    pub fn explain(&self, building_id: &str, ctx: &ScoringContext) -> Result<Explanation, ScoringError> {
        let resolved = self.resolve_context(ctx)?;
        let score = self.score_resolved(building_id, ctx, &resolved)?;
        Ok(self.explain_scored(building_id, ctx, &score))
    }

    /// Rank candidates by total score, highest first; ties keep input order
    pub fn rank(&self, candidate_ids: &[String], ctx: &ScoringContext) -> Result<Ranking, ScoringError> {
        let resolved = self.resolve_context(ctx)?;
        let candidates = candidate_ids
            .iter()
            .enumerate()
            .map(|(index, id)| self.rank_candidate(index, id, ctx, &resolved))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.finish_ranking(candidates))
    }

    /// Same result as `rank`, candidates scored in parallel using Rayon
    pub fn rank_parallel(
        &self,
        candidate_ids: &[String],
        ctx: &ScoringContext,
    ) -> Result<Ranking, ScoringError> {
        let resolved = self.resolve_context(ctx)?;
        let candidates = candidate_ids
            .par_iter()
            .enumerate()
            .map(|(index, id)| self.rank_candidate(index, id, ctx, &resolved))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.finish_ranking(candidates))
    }

    fn finish_ranking(&self, candidates: Vec<RankedCandidate>) -> Ranking {
        let ranking = Ranking::from_candidates(candidates);
        if let Some(winner) = ranking.winner() {
            tracing::info!(
                "Ranked {} candidates, recommended: {} with {} points",
                ranking.len(),
                winner.building_name,
                winner.score.total
            );
        }
        ranking
    }

    fn rank_candidate(
        &self,
        index: usize,
        building_id: &str,
        ctx: &ScoringContext,
        resolved: &ResolvedContext<'_>,
    ) -> Result<RankedCandidate, ScoringError> {
        let score = self.score_resolved(building_id, ctx, resolved)?;
        let explanation = self.explain_scored(building_id, ctx, &score);
        let building_name = self
            .catalog
            .building(building_id)
            .map_or_else(|| building_id.to_string(), |b| b.name.clone());

        Ok(RankedCandidate {
            option: index + 1,
            building_id: building_id.to_string(),
            building_name,
            score,
            explanation,
        })
    }

    fn explain_scored(&self, building_id: &str, ctx: &ScoringContext, score: &ScoreResult) -> Explanation {
        match self.catalog.building(building_id) {
            Some(building) => {
                ExplanationGenerator::generate(&self.catalog, building, score, &ctx.species_ids)
            }
            None => ExplanationGenerator::generate_unknown(building_id, score),
        }
    }

    fn score_resolved(
        &self,
        building_id: &str,
        ctx: &ScoringContext,
        resolved: &ResolvedContext<'_>,
    ) -> Result<ScoreResult, ScoringError> {
        let Some(building) = self.catalog.building(building_id) else {
            if self.is_strict() {
                return Err(ScoringError::UnknownBuilding(building_id.to_string()));
            }
            tracing::debug!("Unknown building '{}' scored as empty", building_id);
            return Ok(ScoreResult::empty());
        };

        let category = calculate_category_bonus(building, &ctx.species_ids, &resolved.current);

        let components = ScoreComponents {
            base: BASE_SCORE,
            species: calculate_species_synergy(building, &ctx.species_ids),
            category: category.category,
            biome: calculate_biome_compatibility(building, resolved.biome),
            synergy: category.synergy,
        };
        let result = ScoreResult::from_components(components);

        tracing::debug!(
            "Scored {}: total={} (base={:.1}, species={:.1}, category={:.1}, biome={:.1}, synergy={:.1})",
            building_id,
            result.total,
            components.base,
            components.species,
            components.category,
            components.biome,
            components.synergy,
        );

        Ok(result)
    }

    fn resolve_context<'a>(&'a self, ctx: &ScoringContext) -> Result<ResolvedContext<'a>, ScoringError> {
        let strict = self.is_strict();

        let biome = self.catalog.biome(&ctx.biome_id);
        if biome.is_none() {
            if strict {
                return Err(ScoringError::UnknownBiome(ctx.biome_id.clone()));
            }
            tracing::debug!("Unknown biome '{}' contributes no bonuses", ctx.biome_id);
        }

        for species in &ctx.species_ids {
            if self.catalog.species(species).is_none() {
                if strict {
                    return Err(ScoringError::UnknownSpecies(species.clone()));
                }
                tracing::debug!("Unknown species '{}' has no affinities", species);
            }
        }

        let mut current = Vec::with_capacity(ctx.current_building_ids.len());
        for id in &ctx.current_building_ids {
            match self.catalog.building(id) {
                Some(building) => current.push(building),
                None if strict => return Err(ScoringError::UnknownBuilding(id.clone())),
                None => tracing::debug!("Unknown built building '{}' ignored", id),
            }
        }

        Ok(ResolvedContext { biome, current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scorer() -> BlueprintScorer {
        BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap()
    }

    #[test]
    fn test_lumber_mill_in_woodlands() {
        let ctx = ScoringContext::new("cursed_royal_woodlands").with_species(["beavers"]);
        let result = scorer().score("lumber_mill", &ctx).unwrap();

        assert_relative_eq!(result.components.base, 50.0);
        assert_relative_eq!(result.components.species, 15.0);
        assert_relative_eq!(result.components.category, 25.0);
        assert_relative_eq!(result.components.biome, 0.0);
        assert_relative_eq!(result.components.synergy, 8.0);
        assert_eq!(result.total, 98);
    }

    #[test]
    fn test_human_house() {
        let ctx = ScoringContext::new("cursed_royal_woodlands").with_species(["humans"]);
        let result = scorer().score("human_house", &ctx).unwrap();

        assert_relative_eq!(result.components.species, 30.0);
        assert_relative_eq!(result.components.category, 35.0);
        assert_eq!(result.total, 115);
    }

    #[test]
    fn test_half_point_rounds_up() {
        // crude_workstation: beavers 1.25 → 7.5 species points
        let ctx = ScoringContext::new("sealed_biome")
            .with_species(["beavers"])
            .with_current_buildings(["crude_workstation"]);
        let result = scorer().score("crude_workstation", &ctx).unwrap();

        assert_relative_eq!(result.components.species, 7.5);
        assert_relative_eq!(result.components.category, 0.0);
        assert_relative_eq!(result.components.synergy, 0.0);
        assert_eq!(result.total, 58);
    }

    #[test]
    fn test_unknown_building_lenient() {
        let ctx = ScoringContext::new("coral_forest");
        let result = scorer().score("castle", &ctx).unwrap();
        assert_eq!(result, ScoreResult::empty());
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_unknown_biome_lenient() {
        let ctx = ScoringContext::new("moon");
        let result = scorer().score("woodcutters_camp", &ctx).unwrap();
        assert_relative_eq!(result.components.biome, 0.0);
        assert_eq!(result.total, 70);
    }

    #[test]
    fn test_strict_mode_rejects_unknown_ids() {
        let strict = BlueprintScorer::with_embedded_catalog(ScorerConfig::strict()).unwrap();

        let ctx = ScoringContext::new("coral_forest").with_species(["humans"]);
        assert_eq!(
            strict.score("castle", &ctx).unwrap_err(),
            ScoringError::UnknownBuilding("castle".to_string())
        );

        let ctx = ScoringContext::new("moon");
        assert_eq!(
            strict.score("tavern", &ctx).unwrap_err(),
            ScoringError::UnknownBiome("moon".to_string())
        );

        let ctx = ScoringContext::new("coral_forest").with_species(["dragons"]);
        assert_eq!(
            strict.score("tavern", &ctx).unwrap_err(),
            ScoringError::UnknownSpecies("dragons".to_string())
        );

        let ctx = ScoringContext::new("coral_forest").with_current_buildings(["castle"]);
        assert_eq!(
            strict.score("tavern", &ctx).unwrap_err(),
            ScoringError::UnknownBuilding("castle".to_string())
        );
    }

    #[test]
    fn test_scarcity_penalty_reaches_total() {
        let json = r#"{
            "biomes": [ { "id": "quarry", "name": "Quarry", "penalties": ["stone_scarcity"] } ],
            "buildings": [
                { "id": "mason", "name": "Mason", "category": "Production", "recipes": ["stone_bricks"] }
            ]
        }"#;
        let catalog = Arc::new(Catalog::from_json(json).unwrap());
        let scorer = BlueprintScorer::new(catalog, ScorerConfig::default());

        let result = scorer.score("mason", &ScoringContext::new("quarry")).unwrap();
        assert_relative_eq!(result.components.biome, -10.0);
        assert_eq!(result.total, 50 + 25 - 10 + 8);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let scorer = scorer();
        let ctx = ScoringContext::new("coral_forest")
            .with_species(["lizards", "foxes", "humans"])
            .with_current_buildings(["butcher", "lizard_house"]);
        let ids: Vec<String> = scorer.catalog().buildings().iter().map(|b| b.id.clone()).collect();

        let batch = scorer.score_batch(&ids, &ctx).unwrap();
        for (id, result) in ids.iter().zip(&batch) {
            assert_eq!(&scorer.score(id, &ctx).unwrap(), result);
        }
    }
}
