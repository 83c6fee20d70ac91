//! Static Catalog
//!
//! Immutable reference data for blueprint scoring: biomes, species and buildings.
//! The catalog is built once (from the embedded default JSON or a file on disk)
//! and handed to the scorer explicitly; nothing mutates it afterwards.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

/// Default catalog shipped with the crate
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Settlement biome with its favourable and unfavourable conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bonuses: Vec<String>,
    #[serde(default)]
    pub penalties: Vec<String>,
}

impl Biome {
    pub fn has_bonus(&self, tag: &str) -> bool {
        self.bonuses.iter().any(|b| b == tag)
    }

    pub fn has_penalty(&self, tag: &str) -> bool {
        self.penalties.iter().any(|p| p == tag)
    }
}

/// Playable species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bonuses: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Building category, selects the scoring branch
///
/// Unrecognized category names are kept as `Other` so they still load; they
/// receive no category bonus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildingCategory {
    Production,
    Housing,
    City,
    ResourceAcquisition,
    Other(String),
}

impl BuildingCategory {
    pub fn as_str(&self) -> &str {
        match self {
            BuildingCategory::Production => "Production",
            BuildingCategory::Housing => "Housing",
            BuildingCategory::City => "City",
            BuildingCategory::ResourceAcquisition => "ResourceAcquisition",
            BuildingCategory::Other(name) => name,
        }
    }
}

impl From<String> for BuildingCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Production" => BuildingCategory::Production,
            "Housing" => BuildingCategory::Housing,
            "City" => BuildingCategory::City,
            "ResourceAcquisition" => BuildingCategory::ResourceAcquisition,
            _ => BuildingCategory::Other(value),
        }
    }
}

impl From<BuildingCategory> for String {
    fn from(value: BuildingCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Species id → affinity multiplier, in catalog order
///
/// Order is significant: housing need picks the first qualifying species
/// in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffinityMap(Vec<(String, f64)>);

impl AffinityMap {
    pub fn get(&self, species_id: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(species, _)| species == species_id)
            .map(|(_, multiplier)| *multiplier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(species, multiplier)| (species.as_str(), *multiplier))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, species_id: impl Into<String>, multiplier: f64) {
        let species_id = species_id.into();
        match self.0.iter_mut().find(|(species, _)| *species == species_id) {
            Some(entry) => entry.1 = multiplier,
            None => self.0.push((species_id, multiplier)),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AffinityMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = AffinityMap::default();
        for (species, multiplier) in iter {
            map.insert(species, multiplier);
        }
        map
    }
}

impl Serialize for AffinityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (species, multiplier) in &self.0 {
            map.serialize_entry(species, multiplier)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AffinityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AffinityVisitor;

        impl<'de> Visitor<'de> for AffinityVisitor {
            type Value = AffinityMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of species id to affinity multiplier")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AffinityMap, A::Error> {
                let mut map = AffinityMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((species, multiplier)) = access.next_entry::<String, f64>()? {
                    map.insert(species, multiplier);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AffinityVisitor)
    }
}

/// Building blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub category: BuildingCategory,
    /// Output goods (Production)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<String>>,
    /// Gathered raw goods (ResourceAcquisition)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing_capacity: Option<u32>,
    #[serde(default)]
    pub species_bonus: AffinityMap,
}

impl Building {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: BuildingCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            recipes: None,
            resources: None,
            service: None,
            housing_capacity: None,
            species_bonus: AffinityMap::default(),
        }
    }

    pub fn with_recipes<I, S>(mut self, recipes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipes = Some(recipes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = Some(resources.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_housing_capacity(mut self, capacity: u32) -> Self {
        self.housing_capacity = Some(capacity);
        self
    }

    pub fn with_affinity(mut self, species_id: impl Into<String>, multiplier: f64) -> Self {
        self.species_bonus.insert(species_id, multiplier);
        self
    }

    pub fn affinity(&self, species_id: &str) -> Option<f64> {
        self.species_bonus.get(species_id)
    }

    /// Recipe tags, empty when the building has none
    pub fn recipes(&self) -> &[String] {
        self.recipes.as_deref().unwrap_or(&[])
    }

    /// Resource tags, empty when the building has none
    pub fn resources(&self) -> &[String] {
        self.resources.as_deref().unwrap_or(&[])
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    biomes: Vec<Biome>,
    #[serde(default)]
    species: Vec<Species>,
    #[serde(default)]
    buildings: Vec<Building>,
}

/// Read-only catalog with id indexes
///
/// Tables keep their file order; lookups go through FxHashMap indexes.
#[derive(Debug, Clone)]
pub struct Catalog {
    biomes: Vec<Biome>,
    species: Vec<Species>,
    buildings: Vec<Building>,
    biome_index: FxHashMap<String, usize>,
    species_index: FxHashMap<String, usize>,
    building_index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Parse the catalog embedded in the crate
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let catalog = Self::from_json(&contents)
            .with_context(|| format!("Failed to load catalog: {:?}", path))?;

        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::from_parts(file.biomes, file.species, file.buildings)
    }

    /// Build a catalog from tables, checking ids and building attributes
    pub fn from_parts(
        biomes: Vec<Biome>,
        species: Vec<Species>,
        buildings: Vec<Building>,
    ) -> Result<Self, CatalogError> {
        let biome_index = index_by_id("biome", biomes.iter().map(|b| b.id.as_str()))?;
        let species_index = index_by_id("species", species.iter().map(|s| s.id.as_str()))?;
        let building_index = index_by_id("building", buildings.iter().map(|b| b.id.as_str()))?;

        for building in &buildings {
            if building.housing_capacity == Some(0) {
                return Err(CatalogError::InvalidCapacity {
                    building: building.id.clone(),
                });
            }
            for (species_id, multiplier) in building.species_bonus.iter() {
                if !multiplier.is_finite() {
                    return Err(CatalogError::InvalidAffinity {
                        building: building.id.clone(),
                        species: species_id.to_string(),
                    });
                }
                if !species_index.contains_key(species_id) {
                    tracing::warn!(
                        "Building '{}' has affinity for unknown species '{}'",
                        building.id,
                        species_id
                    );
                }
            }
        }

        tracing::info!(
            "Loaded catalog: {} biomes, {} species, {} buildings",
            biomes.len(),
            species.len(),
            buildings.len()
        );

        Ok(Self {
            biomes,
            species,
            buildings,
            biome_index,
            species_index,
            building_index,
        })
    }

    pub fn biome(&self, id: &str) -> Option<&Biome> {
        self.biome_index.get(id).map(|&i| &self.biomes[i])
    }

    pub fn species(&self, id: &str) -> Option<&Species> {
        self.species_index.get(id).map(|&i| &self.species[i])
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.building_index.get(id).map(|&i| &self.buildings[i])
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn species_list(&self) -> &[Species] {
        &self.species
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn buildings_in<'a>(
        &'a self,
        category: &'a BuildingCategory,
    ) -> impl Iterator<Item = &'a Building> + 'a {
        self.buildings.iter().filter(move |b| &b.category == category)
    }

    /// Display name for a species id, falling back to the id itself
    pub fn species_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.species(id).map_or(id, |s| s.name.as_str())
    }
}

fn index_by_id<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<FxHashMap<String, usize>, CatalogError> {
    let mut index = FxHashMap::default();
    for (position, id) in ids.enumerate() {
        if id.is_empty() {
            return Err(CatalogError::EmptyId { table });
        }
        if index.insert(id.to_string(), position).is_some() {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}
