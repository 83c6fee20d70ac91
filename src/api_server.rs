// Axum API Server Module
//
// Purpose: REST API over the blueprint scorer: catalog listing, scoring,
// ranking and explanations. Single-building scoring runs inline; ranking
// goes through the blocking pool.

#[cfg(feature = "api")]
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use serde::Deserialize;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::config::ScorerConfig;

#[cfg(feature = "api")]
use crate::data::{Biome, Building, Species};

#[cfg(feature = "api")]
use crate::error::{ScoringError, ValidationError};

#[cfg(feature = "api")]
use crate::explanation::Explanation;

#[cfg(feature = "api")]
use crate::ranking::Ranking;

#[cfg(feature = "api")]
use crate::scorer::{BlueprintScorer, ScoringContext, SpeciesSelection};

#[cfg(feature = "api")]
use crate::validation::{validate_request, BlueprintRequest};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<BlueprintScorer>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: ScorerConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing blueprint scorer ({} lookups)...", config.lookup_policy);
        let scorer = BlueprintScorer::from_config(config)?;
        Ok(Self::from_scorer(scorer))
    }

    pub fn from_scorer(scorer: BlueprintScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Single-building request for /score and /explain
#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
pub struct BuildingRequest {
    pub building_id: String,
    pub biome: String,
    #[serde(default)]
    pub species: SpeciesSelection,
    #[serde(default)]
    pub current_buildings: Vec<String>,
}

#[cfg(feature = "api")]
impl BuildingRequest {
    fn context(&self) -> ScoringContext {
        ScoringContext {
            biome_id: self.biome.clone(),
            species_ids: self.species.clone(),
            current_building_ids: self.current_buildings.clone(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog endpoints
        .route("/api/catalog/biomes", get(list_biomes))
        .route("/api/catalog/species", get(list_species))
        .route("/api/catalog/buildings", get(list_buildings))

        // Blueprint endpoints
        .route("/api/blueprints/score", post(score_blueprint))
        .route("/api/blueprints/rank", post(rank_blueprints))
        .route("/api/blueprints/explain", post(explain_blueprint))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn list_biomes(State(state): State<AppState>) -> Json<Vec<Biome>> {
    Json(state.scorer.catalog().biomes().to_vec())
}

#[cfg(feature = "api")]
async fn list_species(State(state): State<AppState>) -> Json<Vec<Species>> {
    Json(state.scorer.catalog().species_list().to_vec())
}

#[cfg(feature = "api")]
async fn list_buildings(State(state): State<AppState>) -> Json<Vec<Building>> {
    Json(state.scorer.catalog().buildings().to_vec())
}

#[cfg(feature = "api")]
async fn score_blueprint(
    State(state): State<AppState>,
    Json(payload): Json<BuildingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state.scorer.score(&payload.building_id, &payload.context())?;

    Ok(Json(serde_json::json!({
        "building_id": payload.building_id,
        "total": result.total,
        "components": result.components,
    })))
}

/// Validate the three options and rank them
#[cfg(feature = "api")]
async fn rank_blueprints(
    State(state): State<AppState>,
    Json(payload): Json<BlueprintRequest>,
) -> Result<Json<Ranking>, AppError> {
    validate_request(state.scorer.catalog(), &payload)?;

    tracing::info!("Ranking {} blueprint options", payload.candidates.len());

    // CPU-bound work: run in blocking thread pool
    let scorer = state.scorer.clone();
    let ranking = tokio::task::spawn_blocking(move || {
        scorer.rank_parallel(&payload.candidates, &payload.context())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(ranking))
}

#[cfg(feature = "api")]
async fn explain_blueprint(
    State(state): State<AppState>,
    Json(payload): Json<BuildingRequest>,
) -> Result<Json<Explanation>, AppError> {
    let explanation = state.scorer.explain(&payload.building_id, &payload.context())?;
    Ok(Json(explanation))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(feature = "api")]
impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
