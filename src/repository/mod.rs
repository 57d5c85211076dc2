//! Repository Module
//!
//! Read-through caching over the location backing store: one read method per
//! category, plus country mutations that invalidate the countries listing.

mod keys;
mod location;

pub use keys::{cities_key, states_key, CacheValue, Cacheable, COUNTRIES_KEY};
pub use location::{LocationCache, LocationRepository};
