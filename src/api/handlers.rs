//! API Handlers
//!
//! HTTP request handlers mapping location endpoints onto repository calls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::backing::BackingStore;
use crate::cache::EntryInfo;
use crate::config::Config;
use crate::error::Result;
use crate::models::{self, City, Country, ErrorResponse, HealthResponse, StatsResponse};
use crate::repository::{LocationCache, LocationRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: LocationRepository,
}

impl AppState {
    /// Creates a new AppState around an existing repository.
    pub fn new(repository: LocationRepository) -> Self {
        Self { repository }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache store and policy table from the Config and wires
    /// them to `backing`.
    pub fn from_config(config: &Config, backing: Arc<dyn BackingStore>) -> Self {
        let cache = Arc::new(LocationCache::new(config.max_entries));
        Self::new(LocationRepository::new(backing, cache, config.policy_table()))
    }

    /// Shared cache handle, e.g. for the expiry sweep task.
    pub fn cache(&self) -> Arc<LocationCache> {
        Arc::clone(self.repository.cache())
    }
}

/// Handler for GET /api/location/countries
pub async fn get_countries_handler(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    let countries = state.repository.get_countries().await?;
    Ok(Json(countries))
}

/// Handler for GET /api/location/states/:country_id
pub async fn get_states_handler(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<Json<Vec<models::State>>> {
    let states = state.repository.get_states(country_id).await?;
    Ok(Json(states))
}

/// Handler for GET /api/location/cities/:state_id
pub async fn get_cities_handler(
    State(state): State<AppState>,
    Path(state_id): Path<i32>,
) -> Result<Json<Vec<City>>> {
    let cities = state.repository.get_cities(state_id).await?;
    Ok(Json(cities))
}

/// Handler for POST /api/location/countries
///
/// Responds 200 with no body on success.
pub async fn add_country_handler(
    State(state): State<AppState>,
    Json(country): Json<Country>,
) -> Result<StatusCode> {
    state.repository.add_country(country).await?;
    Ok(StatusCode::OK)
}

/// Handler for PUT /api/location/countries/:id
///
/// Responds 400 when the path id and body id differ, 404 when the country
/// does not exist.
pub async fn update_country_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(country): Json<Country>,
) -> Result<StatusCode> {
    state.repository.update_country(id, country).await?;
    Ok(StatusCode::OK)
}

/// Handler for GET /cache/:key
///
/// Returns the policy and remaining lifetime of a live cache entry.
pub async fn cache_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> std::result::Result<Json<EntryInfo>, (StatusCode, Json<ErrorResponse>)> {
    state.repository.cache().inspect(&key).map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(404, format!("No cache entry for '{}'", key))),
        )
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.repository.cache().stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
