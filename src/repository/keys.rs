//! Cache keys and cached payloads for location data.

use crate::cache::Category;
use crate::models::{City, Country, State};

/// Key of the single countries listing.
pub const COUNTRIES_KEY: &str = "Countries";

/// Key of the states listing for one country.
pub fn states_key(country_id: i32) -> String {
    format!("States_{}", country_id)
}

/// Key of the cities listing for one state.
pub fn cities_key(state_id: i32) -> String {
    format!("Cities_{}", state_id)
}

// == Cache Value ==
/// Payload stored in the location cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    Countries(Vec<Country>),
    States(Vec<State>),
    Cities(Vec<City>),
}

/// A record type whose listings are cached under one category.
pub trait Cacheable: Clone + Sized {
    const CATEGORY: Category;

    fn into_cache_value(items: Vec<Self>) -> CacheValue;

    /// Returns None if `value` holds another category's payload.
    fn from_cache_value(value: CacheValue) -> Option<Vec<Self>>;
}

impl Cacheable for Country {
    const CATEGORY: Category = Category::Countries;

    fn into_cache_value(items: Vec<Self>) -> CacheValue {
        CacheValue::Countries(items)
    }

    fn from_cache_value(value: CacheValue) -> Option<Vec<Self>> {
        match value {
            CacheValue::Countries(items) => Some(items),
            _ => None,
        }
    }
}

impl Cacheable for State {
    const CATEGORY: Category = Category::States;

    fn into_cache_value(items: Vec<Self>) -> CacheValue {
        CacheValue::States(items)
    }

    fn from_cache_value(value: CacheValue) -> Option<Vec<Self>> {
        match value {
            CacheValue::States(items) => Some(items),
            _ => None,
        }
    }
}

impl Cacheable for City {
    const CATEGORY: Category = Category::Cities;

    fn into_cache_value(items: Vec<Self>) -> CacheValue {
        CacheValue::Cities(items)
    }

    fn from_cache_value(value: CacheValue) -> Option<Vec<Self>> {
        match value {
            CacheValue::Cities(items) => Some(items),
            _ => None,
        }
    }
}
