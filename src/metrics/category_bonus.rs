//! COMPONENT: CATEGORY BONUS
//!
//! Exactly one branch fires per building category:
//! - Housing: housing need (20 generic, 35/25/15 for a selected species' preferred house)
//! - Production: 25 if not already built, plus the diversity bonus (booked as synergy)
//! - City: 15 (services)
//! - ResourceAcquisition: 20 (resource security)
//! - anything else: 0

use crate::data::{Building, BuildingCategory};
use crate::metrics::housing_need::{calculate_housing_need, HousingNeed};
use crate::metrics::production_diversity::{calculate_production_diversity, ProductionDiversity};

pub const NEW_PRODUCTION_BONUS: f64 = 25.0;
pub const CITY_BONUS: f64 = 15.0;
pub const RESOURCE_ACQUISITION_BONUS: f64 = 20.0;

/// Which category branch fired, with its details
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryBranch {
    Housing(HousingNeed),
    Production {
        already_built: bool,
        diversity: ProductionDiversity,
    },
    City,
    ResourceAcquisition,
    Unscored,
}

/// Result of the category bonus calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBonus {
    /// Added to the category component
    pub category: f64,
    /// Added to the synergy component (production diversity)
    pub synergy: f64,
    pub branch: CategoryBranch,
}

/// Calculate the category bonus
///
/// `current` is the resolved list of built buildings.
pub fn calculate_category_bonus(
    building: &Building,
    species_ids: &[String],
    current: &[&Building],
) -> CategoryBonus {
    match &building.category {
        BuildingCategory::Housing => {
            let need = calculate_housing_need(building, species_ids, current);
            CategoryBonus {
                category: need.bonus,
                synergy: 0.0,
                branch: CategoryBranch::Housing(need),
            }
        }
        BuildingCategory::Production => {
            let already_built = current.iter().any(|b| b.id == building.id);
            let diversity = calculate_production_diversity(building, current);
            CategoryBonus {
                category: if already_built { 0.0 } else { NEW_PRODUCTION_BONUS },
                synergy: diversity.bonus,
                branch: CategoryBranch::Production {
                    already_built,
                    diversity,
                },
            }
        }
        BuildingCategory::City => CategoryBonus {
            category: CITY_BONUS,
            synergy: 0.0,
            branch: CategoryBranch::City,
        },
        BuildingCategory::ResourceAcquisition => CategoryBonus {
            category: RESOURCE_ACQUISITION_BONUS,
            synergy: 0.0,
            branch: CategoryBranch::ResourceAcquisition,
        },
        BuildingCategory::Other(_) => CategoryBonus {
            category: 0.0,
            synergy: 0.0,
            branch: CategoryBranch::Unscored,
        },
    }
}
