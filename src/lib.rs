//! Location Cache - read-through caching for country/state/city reference data
//!
//! Serves location listings from an in-process cache, with a distinct
//! expiration policy per data category, and invalidates on country writes.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::LocationError;
pub use repository::LocationRepository;
pub use tasks::spawn_cleanup_task;
