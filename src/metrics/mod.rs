//! Score component modules for blueprint scoring
//!
//! Each additive component of a blueprint score lives in its own module:
//! species synergy, category bonus (with housing need and production
//! diversity), and biome compatibility.

pub mod species_synergy;
pub mod housing_need;
pub mod production_diversity;
pub mod category_bonus;
pub mod biome_compatibility;

// Re-export component functions
pub use species_synergy::{calculate_species_synergy, NEUTRAL_AFFINITY};
pub use housing_need::{calculate_housing_need, HousingNeed};
pub use production_diversity::{calculate_production_diversity, ProductionDiversity};
pub use category_bonus::{calculate_category_bonus, CategoryBonus, CategoryBranch};
pub use biome_compatibility::calculate_biome_compatibility;

/// Starting score of every known building
pub const BASE_SCORE: f64 = 50.0;
