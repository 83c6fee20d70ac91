//! Request validation
//!
//! Checks a blueprint request against the catalog before it reaches the
//! scorer. Checks run in a fixed order and the first failure is returned.
//! The scorer itself never validates.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::data::Catalog;
use crate::error::ValidationError;
use crate::scorer::{ScoringContext, SpeciesSelection};

/// Species a settlement starts with
pub const REQUIRED_SPECIES: usize = 3;

/// Blueprint options offered per draw
pub const BLUEPRINT_OPTIONS: usize = 3;

/// A blueprint choice as submitted by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRequest {
    pub biome: String,
    #[serde(default)]
    pub species: SpeciesSelection,
    #[serde(default)]
    pub current_buildings: Vec<String>,
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl BlueprintRequest {
    pub fn context(&self) -> ScoringContext {
        ScoringContext {
            biome_id: self.biome.clone(),
            species_ids: self.species.clone(),
            current_building_ids: self.current_buildings.clone(),
        }
    }
}

/// Validate a request, returning the first failed check
pub fn validate_request(catalog: &Catalog, request: &BlueprintRequest) -> Result<(), ValidationError> {
    // Biome
    if request.biome.trim().is_empty() {
        return Err(ValidationError::MissingBiome);
    }
    if catalog.biome(&request.biome).is_none() {
        return Err(ValidationError::UnknownBiome(request.biome.clone()));
    }

    // Species
    if request.species.len() != REQUIRED_SPECIES {
        return Err(ValidationError::SpeciesCount {
            expected: REQUIRED_SPECIES,
            actual: request.species.len(),
        });
    }
    let mut seen = FxHashSet::default();
    for species in &request.species {
        if !seen.insert(species.as_str()) {
            return Err(ValidationError::DuplicateSpecies(species.clone()));
        }
    }
    if let Some(unknown) = request.species.iter().find(|s| catalog.species(s).is_none()) {
        return Err(ValidationError::UnknownSpecies(unknown.clone()));
    }

    // Blueprint options
    let selected = request
        .candidates
        .iter()
        .filter(|c| !c.trim().is_empty())
        .count();
    if request.candidates.len() != BLUEPRINT_OPTIONS || selected != BLUEPRINT_OPTIONS {
        return Err(ValidationError::MissingBlueprint {
            expected: BLUEPRINT_OPTIONS,
            actual: selected,
        });
    }
    let distinct: FxHashSet<&str> = request.candidates.iter().map(String::as_str).collect();
    if distinct.len() != request.candidates.len() {
        return Err(ValidationError::DuplicateBlueprint {
            expected: BLUEPRINT_OPTIONS,
        });
    }
    if let Some(unknown) = request.candidates.iter().find(|c| catalog.building(c).is_none()) {
        return Err(ValidationError::UnknownBuilding(unknown.clone()));
    }

    // Current buildings
    if let Some(unknown) = request
        .current_buildings
        .iter()
        .find(|b| catalog.building(b).is_none())
    {
        return Err(ValidationError::UnknownBuilding(unknown.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BlueprintRequest {
        BlueprintRequest {
            biome: "coral_forest".to_string(),
            species: ["humans", "beavers", "lizards"].iter().map(|s| s.to_string()).collect(),
            current_buildings: vec!["butcher".to_string()],
            candidates: vec!["tavern".to_string(), "cookhouse".to_string(), "lizard_house".to_string()],
        }
    }

    fn check(request: &BlueprintRequest) -> Result<(), ValidationError> {
        validate_request(&Catalog::embedded().unwrap(), request)
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(check(&valid()), Ok(()));
    }

    #[test]
    fn test_biome_checks() {
        let mut request = valid();
        request.biome = String::new();
        assert_eq!(check(&request), Err(ValidationError::MissingBiome));

        request.biome = "moon".to_string();
        assert_eq!(check(&request), Err(ValidationError::UnknownBiome("moon".to_string())));
    }

    #[test]
    fn test_species_checks() {
        let mut request = valid();
        request.species.pop();
        assert_eq!(
            check(&request),
            Err(ValidationError::SpeciesCount { expected: 3, actual: 2 })
        );

        request.species.push("humans".to_string());
        assert_eq!(check(&request), Err(ValidationError::DuplicateSpecies("humans".to_string())));

        request.species[2] = "dragons".to_string();
        assert_eq!(check(&request), Err(ValidationError::UnknownSpecies("dragons".to_string())));
    }

    #[test]
    fn test_blueprint_checks() {
        let mut request = valid();
        request.candidates[1] = String::new();
        assert_eq!(
            check(&request),
            Err(ValidationError::MissingBlueprint { expected: 3, actual: 2 })
        );

        request.candidates.truncate(2);
        request.candidates[1] = "cookhouse".to_string();
        assert_eq!(
            check(&request),
            Err(ValidationError::MissingBlueprint { expected: 3, actual: 2 })
        );

        request.candidates.push("tavern".to_string());
        assert_eq!(check(&request), Err(ValidationError::DuplicateBlueprint { expected: 3 }));

        request.candidates[2] = "castle".to_string();
        assert_eq!(check(&request), Err(ValidationError::UnknownBuilding("castle".to_string())));
    }

    #[test]
    fn test_current_buildings_checked_last() {
        let mut request = valid();
        request.current_buildings.push("ruins".to_string());
        assert_eq!(check(&request), Err(ValidationError::UnknownBuilding("ruins".to_string())));

        // An earlier failure wins
        request.biome = String::new();
        assert_eq!(check(&request), Err(ValidationError::MissingBiome));
    }

    #[test]
    fn test_request_context() {
        let ctx = valid().context();
        assert_eq!(ctx.biome_id, "coral_forest");
        assert_eq!(ctx.species_ids.len(), 3);
        assert_eq!(ctx.current_building_ids, vec!["butcher".to_string()]);
    }
}
