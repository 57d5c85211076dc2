//! Data models for the location service
//!
//! Location records shared by the backing store, cache and API, plus the
//! DTOs used for serializing HTTP response bodies.

pub mod location;
pub mod responses;

// Re-export commonly used types
pub use location::{City, Country, State};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
