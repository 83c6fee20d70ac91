//! Blueprint Scorer
//!
//! Scores and ranks building blueprint options for a settlement, given the
//! biome, the selected species and the buildings already placed.
//!
//! Module layout:
//! - `data`: static catalog of biomes, species and buildings
//! - `metrics`: individual score components
//! - `scorer`: combines components, scores and ranks candidates
//! - `ranking`: ordered results with winner and tie groups
//! - `explanation`: detail strings, breakdowns and formatters
//! - `validation`: request checks applied before scoring

pub mod config;
pub mod error;
pub mod utils;
pub mod data;
pub mod metrics;
pub mod scorer;
pub mod ranking;
pub mod explanation;
pub mod validation;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::{LookupPolicy, ScorerConfig, ServerConfig};
pub use error::{CatalogError, ConfigError, ScoringError, ValidationError};
pub use data::{AffinityMap, Biome, Building, BuildingCategory, Catalog, Species};
pub use scorer::{BlueprintScorer, ScoreComponents, ScoreResult, ScoringContext, SpeciesSelection};
pub use ranking::{RankedCandidate, Ranking};
pub use explanation::{Explanation, ExplanationGenerator, JsonFormatter, MarkdownFormatter, ScoreTier};
pub use validation::{validate_request, BlueprintRequest, BLUEPRINT_OPTIONS, REQUIRED_SPECIES};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
