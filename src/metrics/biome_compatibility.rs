//! COMPONENT: BIOME COMPATIBILITY
//!
//! Tag matching between a building's goods and the biome's conditions.
//! Only Production and ResourceAcquisition buildings participate.
//!
//! - Production: +15 per recipe containing "wood" / "meat" / "food" when the
//!   biome has the matching `*_production` bonus; -10 per recipe containing
//!   "wood" / "stone" when the biome has `wood_scarcity` / `stone_scarcity`.
//! - ResourceAcquisition: +20 per resource equal to "wood" / "meat" with the
//!   matching production bonus, or "mushrooms" / "berries" with `foraging`.
//!
//! Recipe matching is plain case-sensitive substring containment, so a tag
//! like "woodcarving_tools" matches "wood". Resource matching is exact.

use crate::data::{Biome, Building, BuildingCategory};

pub const RECIPE_BONUS: f64 = 15.0;
pub const RESOURCE_BONUS: f64 = 20.0;
pub const SCARCITY_PENALTY: f64 = 10.0;

/// (recipe substring, biome bonus tag)
const RECIPE_BONUS_RULES: [(&str, &str); 3] = [
    ("wood", "wood_production"),
    ("meat", "meat_production"),
    ("food", "food_production"),
];

/// (recipe substring, biome penalty tag)
const SCARCITY_RULES: [(&str, &str); 2] = [
    ("wood", "wood_scarcity"),
    ("stone", "stone_scarcity"),
];

/// (resource tags, biome bonus tag)
const RESOURCE_RULES: [(&[&str], &str); 3] = [
    (&["wood"], "wood_production"),
    (&["meat"], "meat_production"),
    (&["mushrooms", "berries"], "foraging"),
];

/// Calculate the biome compatibility component (may be negative)
///
/// An unknown biome (`None`) contributes 0.
pub fn calculate_biome_compatibility(building: &Building, biome: Option<&Biome>) -> f64 {
    let Some(biome) = biome else {
        return 0.0;
    };

    match building.category {
        BuildingCategory::Production => {
            let recipes = building.recipes();
            let bonus: f64 = recipes
                .iter()
                .map(|recipe| {
                    RECIPE_BONUS_RULES
                        .iter()
                        .filter(|(needle, tag)| recipe.contains(needle) && biome.has_bonus(tag))
                        .count() as f64
                        * RECIPE_BONUS
                })
                .sum();
            let penalty: f64 = recipes
                .iter()
                .map(|recipe| {
                    SCARCITY_RULES
                        .iter()
                        .filter(|(needle, tag)| recipe.contains(needle) && biome.has_penalty(tag))
                        .count() as f64
                        * SCARCITY_PENALTY
                })
                .sum();
            bonus - penalty
        }
        BuildingCategory::ResourceAcquisition => building
            .resources()
            .iter()
            .map(|resource| {
                RESOURCE_RULES
                    .iter()
                    .filter(|(resources, tag)| {
                        resources.contains(&resource.as_str()) && biome.has_bonus(tag)
                    })
                    .count() as f64
                    * RESOURCE_BONUS
            })
            .sum(),
        _ => 0.0,
    }
}
