//! COMPONENT: PRODUCTION DIVERSITY (synergy bonus for Production buildings)
//!
//! 8 points for every recipe the candidate adds that no built Production
//! building already makes.

use rustc_hash::FxHashSet;

use crate::data::{Building, BuildingCategory};

/// Points per recipe tag not yet produced
pub const NEW_RECIPE_BONUS: f64 = 8.0;

/// Result of the production diversity calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionDiversity {
    pub bonus: f64,
    /// Candidate recipes not produced by any built building, in recipe order
    pub new_recipes: Vec<String>,
}

/// Calculate the diversity bonus for a Production candidate
///
/// Only Production buildings in `current` contribute to the set of recipes
/// already produced.
pub fn calculate_production_diversity(
    building: &Building,
    current: &[&Building],
) -> ProductionDiversity {
    let Some(recipes) = building.recipes.as_deref() else {
        return ProductionDiversity {
            bonus: 0.0,
            new_recipes: Vec::new(),
        };
    };

    let produced: FxHashSet<&str> = current
        .iter()
        .filter(|b| b.category == BuildingCategory::Production)
        .flat_map(|b| b.recipes().iter().map(String::as_str))
        .collect();

    let new_recipes: Vec<String> = recipes
        .iter()
        .filter(|recipe| !produced.contains(recipe.as_str()))
        .cloned()
        .collect();

    ProductionDiversity {
        bonus: new_recipes.len() as f64 * NEW_RECIPE_BONUS,
        new_recipes,
    }
}
