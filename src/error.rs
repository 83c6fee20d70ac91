//! Error types for catalog loading, scoring, request validation and configuration.

use thiserror::Error;

/// Failure while loading or checking the static catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{table} entry has an empty id")]
    EmptyId { table: &'static str },

    #[error("{table} id '{id}' defined more than once")]
    DuplicateId { table: &'static str, id: String },

    #[error("building '{building}' has housing capacity 0 (must be > 0)")]
    InvalidCapacity { building: String },

    #[error("building '{building}' has non-finite affinity for species '{species}'")]
    InvalidAffinity { building: String, species: String },
}

/// Unresolved identifier under `LookupPolicy::Strict`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("unknown building '{0}'")]
    UnknownBuilding(String),

    #[error("unknown biome '{0}'")]
    UnknownBiome(String),

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
}

/// Malformed blueprint request, rejected before the engine runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select a biome")]
    MissingBiome,

    #[error("unknown biome '{0}'")]
    UnknownBiome(String),

    #[error("please select exactly {expected} species (got {actual})")]
    SpeciesCount { expected: usize, actual: usize },

    #[error("species '{0}' selected more than once")]
    DuplicateSpecies(String),

    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("please select all {expected} blueprint options (got {actual})")]
    MissingBlueprint { expected: usize, actual: usize },

    #[error("please select {expected} different buildings for your blueprints")]
    DuplicateBlueprint { expected: usize },

    #[error("unknown building '{0}'")]
    UnknownBuilding(String),
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid lookup policy '{0}' (expected 'lenient' or 'strict')")]
    InvalidLookupPolicy(String),

    #[error("invalid port '{0}'")]
    InvalidPort(String),
}
