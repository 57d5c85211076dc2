//! Backing Store Module
//!
//! The persistent source of truth behind the cache. The repository talks to
//! it only through the [`BackingStore`] trait.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{City, Country, State};

pub use memory::{MemoryStore, SeedData};

// == Backing Store Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackingStoreError {
    /// The targeted record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Duplicate identifier or foreign-key violation
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// The store could not be reached
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),
}

// == Backing Store ==
/// CRUD surface over countries, states and cities.
///
/// Listings return ordered collections (order is not significant); an empty
/// match is an empty vector, never an error.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// List every country (with empty `states`)
    async fn list_countries(&self) -> Result<Vec<Country>, BackingStoreError>;

    /// List the states of one country
    async fn list_states(&self, country_id: i32) -> Result<Vec<State>, BackingStoreError>;

    /// List the cities of one state
    async fn list_cities(&self, state_id: i32) -> Result<Vec<City>, BackingStoreError>;

    /// Insert a country and any nested states/cities.
    ///
    /// Returns the stored country id (assigned when `country_id == 0`).
    async fn insert_country(&self, country: Country) -> Result<i32, BackingStoreError>;

    /// Update an existing country by id.
    ///
    /// Fails with [`BackingStoreError::NotFound`] when the id is absent.
    async fn update_country(&self, country: Country) -> Result<(), BackingStoreError>;
}
