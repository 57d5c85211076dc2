//! Location Repository
//!
//! Read-through / write-invalidate orchestration over the cache store and
//! the backing store.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::keys::{cities_key, states_key, CacheValue, Cacheable, COUNTRIES_KEY};
use crate::backing::{BackingStore, BackingStoreError};
use crate::cache::{CacheStore, PolicyTable};
use crate::error::{LocationError, Result};
use crate::models::{City, Country, State};

/// Cache store specialised for location payloads.
pub type LocationCache = CacheStore<CacheValue>;

// == Location Repository ==
/// Serves country/state/city listings from cache, falling back to the
/// backing store on a miss.
#[derive(Clone)]
pub struct LocationRepository {
    backing: Arc<dyn BackingStore>,
    cache: Arc<LocationCache>,
    policies: PolicyTable,
}

impl LocationRepository {
    pub fn new(
        backing: Arc<dyn BackingStore>,
        cache: Arc<LocationCache>,
        policies: PolicyTable,
    ) -> Self {
        Self {
            backing,
            cache,
            policies,
        }
    }

    /// Shared handle to the underlying cache.
    pub fn cache(&self) -> &Arc<LocationCache> {
        &self.cache
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    // == Reads ==

    /// All countries. Cached with no expiration and high priority.
    pub async fn get_countries(&self) -> Result<Vec<Country>> {
        self.read_through(COUNTRIES_KEY.to_string(), || self.backing.list_countries())
            .await
    }

    /// States of one country. Cached with sliding expiration.
    pub async fn get_states(&self, country_id: i32) -> Result<Vec<State>> {
        self.read_through(states_key(country_id), || self.backing.list_states(country_id))
            .await
    }

    /// Cities of one state. Cached with absolute expiration.
    pub async fn get_cities(&self, state_id: i32) -> Result<Vec<City>> {
        self.read_through(cities_key(state_id), || self.backing.list_cities(state_id))
            .await
    }

    async fn read_through<T, F, Fut>(&self, key: String, fetch: F) -> Result<Vec<T>>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<T>, BackingStoreError>>,
    {
        if let Some(value) = self.cache.try_get(&key) {
            match T::from_cache_value(value) {
                Some(items) => {
                    debug!(key = %key, "cache hit");
                    return Ok(items);
                }
                None => warn!(key = %key, "cached payload has the wrong shape, refetching"),
            }
        }

        debug!(
            key = %key,
            category = T::CATEGORY.as_str(),
            "cache miss, fetching from backing store"
        );
        // Taken before the fetch so a concurrent invalidation wins
        let ticket = self.cache.ticket(&key);
        let items = fetch().await?;

        let policy = self.policies.for_category(T::CATEGORY);
        let stored = self.cache.set_if_current(
            key.as_str(),
            T::into_cache_value(items.clone()),
            policy,
            ticket,
        );
        if !stored {
            debug!(key = %key, "key invalidated during fetch, result not cached");
        }

        Ok(items)
    }

    // == Mutations ==

    /// Inserts a country and invalidates the countries listing.
    ///
    /// Returns the stored id. On failure the cache is left untouched.
    pub async fn add_country(&self, country: Country) -> Result<i32> {
        let country_id = self.backing.insert_country(country).await?;
        self.invalidate_countries();
        info!(country_id, "country added");
        Ok(country_id)
    }

    /// Updates country `id` and invalidates the countries listing.
    ///
    /// `id` must equal `country.country_id`; a mismatch is rejected before
    /// the backing store or cache is touched.
    pub async fn update_country(&self, id: i32, country: Country) -> Result<()> {
        if id != country.country_id {
            return Err(LocationError::Validation(format!(
                "Path id {} does not match payload id {}",
                id, country.country_id
            )));
        }

        match self.backing.update_country(country).await {
            Ok(()) => {
                self.invalidate_countries();
                info!(country_id = id, "country updated");
                Ok(())
            }
            Err(BackingStoreError::NotFound(_)) => {
                Err(LocationError::NotFound(format!("Country {}", id)))
            }
            Err(err) => {
                if !self.country_exists(id).await {
                    return Err(LocationError::NotFound(format!("Country {}", id)));
                }
                Err(err.into())
            }
        }
    }

    /// Drops the cached countries listing so the next read re-fetches it.
    pub fn invalidate_countries(&self) {
        self.cache.remove(COUNTRIES_KEY);
    }

    /// Existence re-check after a failed update. Goes to the backing store
    /// directly so the cache is neither read nor populated. If the check
    /// itself fails the country is assumed to exist, which keeps the
    /// original failure as the reported one.
    async fn country_exists(&self, id: i32) -> bool {
        match self.backing.list_countries().await {
            Ok(countries) => countries.iter().any(|c| c.country_id == id),
            Err(err) => {
                warn!(country_id = id, error = %err, "existence check failed");
                true
            }
        }
    }
}
