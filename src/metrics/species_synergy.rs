//! COMPONENT: SPECIES SYNERGY
//!
//! Rewards buildings that the selected species work well in and penalizes
//! buildings they are poor at. Each selected species with a nonzero affinity
//! entry contributes `(affinity - 1.0) * 30`; neutral affinity (1.0) and
//! missing entries contribute nothing.

use crate::data::Building;

/// Points per unit of affinity above (or below) neutral
pub const AFFINITY_WEIGHT: f64 = 30.0;

/// Neutral affinity multiplier
pub const NEUTRAL_AFFINITY: f64 = 1.0;

/// Calculate the species synergy component
///
/// Every entry of `species_ids` is visited, so a species listed twice counts twice.
pub fn calculate_species_synergy(building: &Building, species_ids: &[String]) -> f64 {
    species_ids
        .iter()
        .filter_map(|species| building.affinity(species))
        .filter(|&multiplier| multiplier != 0.0)
        .map(|multiplier| (multiplier - NEUTRAL_AFFINITY) * AFFINITY_WEIGHT)
        .sum()
}
