use crate::data::{Building, Catalog};
use crate::explanation::types::{Explanation, ScoreTier};
use crate::metrics::NEUTRAL_AFFINITY;
use crate::scorer::{ScoreComponents, ScoreResult};
use crate::utils::round_half_up;

/// Separator between detail clauses and between breakdown lines
pub const DETAIL_SEPARATOR: &str = " • ";

/// Main explanation generator
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Generate the explanation for a scored catalog building
    pub fn generate(
        catalog: &Catalog,
        building: &Building,
        score: &ScoreResult,
        species_ids: &[String],
    ) -> Explanation {
        Explanation {
            building_id: building.id.clone(),
            building_name: building.name.clone(),
            detail: Self::detail(catalog, building, species_ids),
            breakdown: Self::breakdown(&score.components),
            tier: ScoreTier::from_total(score.total),
        }
    }

    /// Explanation for an id missing from the catalog (lenient scoring)
    pub fn generate_unknown(building_id: &str, score: &ScoreResult) -> Explanation {
        Explanation {
            building_id: building_id.to_string(),
            building_name: building_id.to_string(),
            detail: String::new(),
            breakdown: Vec::new(),
            tier: ScoreTier::from_total(score.total),
        }
    }

    /// Human-readable summary of what the building is and who it suits
    pub fn detail(catalog: &Catalog, building: &Building, species_ids: &[String]) -> String {
        let mut clauses = vec![format!("Category: {}", building.category)];

        let strong: Vec<&str> = species_ids
            .iter()
            .filter(|s| building.affinity(s.as_str()).is_some_and(|m| m > NEUTRAL_AFFINITY))
            .map(|s| catalog.species_name(s))
            .collect();
        if !strong.is_empty() {
            clauses.push(format!("Strong with: {}", strong.join(", ")));
        }

        if let Some(recipes) = &building.recipes {
            clauses.push(format!("Produces: {}", recipes.join(", ")));
        }
        if let Some(resources) = &building.resources {
            clauses.push(format!("Gathers: {}", resources.join(", ")));
        }
        if let Some(service) = &building.service {
            clauses.push(format!("Provides: {}", service));
        }
        if let Some(capacity) = building.housing_capacity {
            clauses.push(format!("Houses: {} villagers", capacity));
        }

        clauses.join(DETAIL_SEPARATOR)
    }

    /// Itemize the positive components; negative ones only show in the total
    pub fn breakdown(components: &ScoreComponents) -> Vec<String> {
        [
            ("Base", components.base),
            ("Species Synergy", components.species),
            ("Category Bonus", components.category),
            ("Biome Compatibility", components.biome),
            ("Synergy Bonus", components.synergy),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| format!("{}: +{}", label, round_half_up(value)))
        .collect()
    }
}
