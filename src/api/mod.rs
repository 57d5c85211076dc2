//! API Module
//!
//! HTTP handlers and routing for the location service REST API.
//!
//! # Endpoints
//! - `GET /api/location/countries` - List all countries
//! - `POST /api/location/countries` - Add a country
//! - `PUT /api/location/countries/:id` - Update a country
//! - `GET /api/location/states/:country_id` - List states of a country
//! - `GET /api/location/cities/:state_id` - List cities of a state
//! - `GET /cache/:key` - Inspect a cache entry
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
