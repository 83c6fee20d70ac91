//! COMPONENT: HOUSING NEED (category bonus for Housing buildings)
//!
//! Housing is valuable in general (flat 20). Housing that one of the selected
//! species strongly prefers (affinity > 1.5) is worth more while that species
//! is short of homes: 35 with none built, 25 with one, then 15 from two on.

use crate::data::{Building, BuildingCategory};

/// Affinity above which a house "belongs" to a species
pub const PREFERRED_HOUSING_AFFINITY: f64 = 1.5;

/// Bonus for housing with no qualifying species
pub const GENERIC_HOUSING_BONUS: f64 = 20.0;

/// Bonus for the first preferred house of a species
pub const FIRST_PREFERRED_BONUS: f64 = 35.0;

/// Reduction per preferred house already built
pub const EXISTING_HOUSING_STEP: f64 = 10.0;

/// Floor of the preferred-housing bonus
pub const MIN_PREFERRED_BONUS: f64 = 15.0;

/// Result of the housing need calculation
#[derive(Debug, Clone, PartialEq)]
pub struct HousingNeed {
    pub bonus: f64,
    /// Selected species this house serves best, if any
    pub species: Option<String>,
    /// Preferred houses of that species already built
    pub existing: usize,
}

/// Calculate housing need for a Housing building
///
/// The qualifying species is the first entry in the building's affinity order
/// that exceeds 1.5 and is selected. `current` is the resolved list of built
/// buildings; duplicates each count.
pub fn calculate_housing_need(
    building: &Building,
    species_ids: &[String],
    current: &[&Building],
) -> HousingNeed {
    let generic = HousingNeed {
        bonus: GENERIC_HOUSING_BONUS,
        species: None,
        existing: 0,
    };

    if building.species_bonus.is_empty() {
        return generic;
    }

    let best_species = building
        .species_bonus
        .iter()
        .find(|(species, multiplier)| {
            *multiplier > PREFERRED_HOUSING_AFFINITY && species_ids.iter().any(|s| s.as_str() == *species)
        })
        .map(|(species, _)| species);

    let Some(species) = best_species else {
        return generic;
    };

    let existing = current
        .iter()
        .filter(|existing| {
            existing.category == BuildingCategory::Housing
                && existing
                    .affinity(species)
                    .map_or(false, |m| m > PREFERRED_HOUSING_AFFINITY)
        })
        .count();

    let bonus = (FIRST_PREFERRED_BONUS - existing as f64 * EXISTING_HOUSING_STEP)
        .max(MIN_PREFERRED_BONUS);

    HousingNeed {
        bonus,
        species: Some(species.to_string()),
        existing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(id: &str, species: &str) -> Building {
        Building::new(id, id, BuildingCategory::Housing)
            .with_affinity(species, 2.0)
            .with_housing_capacity(4)
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diminishing_returns() {
        let candidate = house("human_house", "humans");
        let built = house("human_house", "humans");
        let species = ids(&["humans"]);

        let expected = [35.0, 25.0, 15.0, 15.0, 15.0];
        for (count, want) in expected.iter().enumerate() {
            let current: Vec<&Building> = std::iter::repeat(&built).take(count).collect();
            let need = calculate_housing_need(&candidate, &species, &current);
            assert_eq!(need.bonus, *want, "existing count {}", count);
            assert_eq!(need.existing, count);
            assert_eq!(need.species.as_deref(), Some("humans"));
        }
    }

    #[test]
    fn test_no_qualifying_species() {
        let candidate = house("human_house", "humans");
        let need = calculate_housing_need(&candidate, &ids(&["beavers", "foxes"]), &[]);
        assert_eq!(need.bonus, 20.0);
        assert!(need.species.is_none());
    }

    #[test]
    fn test_no_affinity_map() {
        let candidate = Building::new("shelter", "Shelter", BuildingCategory::Housing);
        let need = calculate_housing_need(&candidate, &ids(&["humans"]), &[]);
        assert_eq!(need.bonus, 20.0);
    }

    #[test]
    fn test_exactly_threshold_does_not_qualify() {
        let candidate = Building::new("longhouse", "Longhouse", BuildingCategory::Housing)
            .with_affinity("humans", 1.5);
        let need = calculate_housing_need(&candidate, &ids(&["humans"]), &[]);
        assert_eq!(need.bonus, 20.0);
    }

    #[test]
    fn test_first_in_affinity_order_wins() {
        // foxes precede humans in the affinity map, regardless of selection order
        let candidate = Building::new("manor", "Manor", BuildingCategory::Housing)
            .with_affinity("foxes", 1.75)
            .with_affinity("humans", 2.0);
        let built_human = house("human_house", "humans");

        let need = calculate_housing_need(&candidate, &ids(&["humans", "foxes"]), &[&built_human]);
        assert_eq!(need.species.as_deref(), Some("foxes"));
        assert_eq!(need.existing, 0);
        assert_eq!(need.bonus, 35.0);
    }

    #[test]
    fn test_only_housing_counts_as_existing() {
        let candidate = house("beaver_house", "beavers");
        let hall = Building::new("clan_hall", "Clan Hall", BuildingCategory::City)
            .with_affinity("beavers", 2.0);
        let need = calculate_housing_need(&candidate, &ids(&["beavers"]), &[&hall]);
        assert_eq!(need.existing, 0);
        assert_eq!(need.bonus, 35.0);
    }
}
