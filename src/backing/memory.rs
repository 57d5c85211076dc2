//! In-memory backing store
//!
//! Table-per-entity store guarded by a tokio RwLock. Enforces the
//! state→country and city→state foreign keys and assigns identity values for
//! records inserted with id 0.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::{BackingStore, BackingStoreError};
use crate::models::{City, Country, State};

// == Seed Data ==
/// Initial contents for a [`MemoryStore`], usually loaded from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub countries: Vec<Country>,
    pub states: Vec<State>,
    pub cities: Vec<City>,
}

#[derive(Debug, Default)]
struct Tables {
    countries: BTreeMap<i32, Country>,
    states: BTreeMap<i32, State>,
    cities: BTreeMap<i32, City>,
}

/// Next identity value, or None once the table's highest id is `i32::MAX`.
fn next_id<V>(table: &BTreeMap<i32, V>) -> Option<i32> {
    match table.keys().next_back() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Hands out `next` and advances it, failing once the id space is used up.
fn take_id(next: &mut Option<i32>, table: &str) -> Result<i32, BackingStoreError> {
    let id = next.ok_or_else(|| {
        BackingStoreError::Conflict(format!("{} identity values exhausted", table))
    })?;
    *next = id.checked_add(1);
    Ok(id)
}

impl Tables {
    fn add_country(&mut self, country: Country) -> Result<i32, BackingStoreError> {
        let country_id = match country.country_id {
            0 => take_id(&mut next_id(&self.countries), "Country")?,
            id if self.countries.contains_key(&id) => {
                return Err(BackingStoreError::Conflict(format!(
                    "Country {} already exists",
                    id
                )))
            }
            id => id,
        };

        // Validate the whole graph before writing anything
        let mut next_state = next_id(&self.states);
        let mut next_city = next_id(&self.cities);
        let mut new_states: Vec<State> = Vec::with_capacity(country.states.len());
        let mut new_cities: Vec<City> = Vec::new();

        for state in country.states {
            let state_id = if state.state_id == 0 {
                take_id(&mut next_state, "State")?
            } else {
                state.state_id
            };
            if self.states.contains_key(&state_id)
                || new_states.iter().any(|s| s.state_id == state_id)
            {
                return Err(BackingStoreError::Conflict(format!(
                    "State {} already exists",
                    state_id
                )));
            }

            for city in state.cities {
                let city_id = if city.city_id == 0 {
                    take_id(&mut next_city, "City")?
                } else {
                    city.city_id
                };
                if self.cities.contains_key(&city_id)
                    || new_cities.iter().any(|c| c.city_id == city_id)
                {
                    return Err(BackingStoreError::Conflict(format!(
                        "City {} already exists",
                        city_id
                    )));
                }
                new_cities.push(City::new(city_id, city.name, state_id));
            }

            new_states.push(State::new(state_id, state.name, country_id));
        }

        self.countries
            .insert(country_id, Country::new(country_id, country.name));
        for state in new_states {
            self.states.insert(state.state_id, state);
        }
        for city in new_cities {
            self.cities.insert(city.city_id, city);
        }

        Ok(country_id)
    }

    fn add_state(&mut self, state: State) -> Result<i32, BackingStoreError> {
        if !self.countries.contains_key(&state.country_id) {
            return Err(BackingStoreError::Conflict(format!(
                "State {} references missing country {}",
                state.state_id, state.country_id
            )));
        }
        let state_id = match state.state_id {
            0 => take_id(&mut next_id(&self.states), "State")?,
            id if self.states.contains_key(&id) => {
                return Err(BackingStoreError::Conflict(format!(
                    "State {} already exists",
                    id
                )))
            }
            id => id,
        };
        self.states
            .insert(state_id, State::new(state_id, state.name, state.country_id));
        Ok(state_id)
    }

    fn add_city(&mut self, city: City) -> Result<i32, BackingStoreError> {
        if !self.states.contains_key(&city.state_id) {
            return Err(BackingStoreError::Conflict(format!(
                "City {} references missing state {}",
                city.city_id, city.state_id
            )));
        }
        let city_id = match city.city_id {
            0 => take_id(&mut next_id(&self.cities), "City")?,
            id if self.cities.contains_key(&id) => {
                return Err(BackingStoreError::Conflict(format!(
                    "City {} already exists",
                    id
                )))
            }
            id => id,
        };
        self.cities
            .insert(city_id, City::new(city_id, city.name, city.state_id));
        Ok(city_id)
    }
}

// == Memory Store ==
/// In-process [`BackingStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from seed data, enforcing foreign keys in
    /// countries → states → cities order.
    pub fn from_seed(seed: SeedData) -> Result<Self, BackingStoreError> {
        let mut tables = Tables::default();
        for country in seed.countries {
            tables.add_country(country)?;
        }
        for state in seed.states {
            tables.add_state(state)?;
        }
        for city in seed.cities {
            tables.add_city(city)?;
        }

        debug!(
            countries = tables.countries.len(),
            states = tables.states.len(),
            cities = tables.cities.len(),
            "seeded memory store"
        );

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// Inserts a state; its country must exist.
    pub async fn insert_state(&self, state: State) -> Result<i32, BackingStoreError> {
        self.tables.write().await.add_state(state)
    }

    /// Inserts a city; its state must exist.
    pub async fn insert_city(&self, city: City) -> Result<i32, BackingStoreError> {
        self.tables.write().await.add_city(city)
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn list_countries(&self) -> Result<Vec<Country>, BackingStoreError> {
        Ok(self.tables.read().await.countries.values().cloned().collect())
    }

    async fn list_states(&self, country_id: i32) -> Result<Vec<State>, BackingStoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .states
            .values()
            .filter(|s| s.country_id == country_id)
            .cloned()
            .collect())
    }

    async fn list_cities(&self, state_id: i32) -> Result<Vec<City>, BackingStoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cities
            .values()
            .filter(|c| c.state_id == state_id)
            .cloned()
            .collect())
    }

    async fn insert_country(&self, country: Country) -> Result<i32, BackingStoreError> {
        self.tables.write().await.add_country(country)
    }

    async fn update_country(&self, country: Country) -> Result<(), BackingStoreError> {
        let mut tables = self.tables.write().await;
        match tables.countries.get_mut(&country.country_id) {
            Some(existing) => {
                existing.name = country.name;
                Ok(())
            }
            None => Err(BackingStoreError::NotFound(format!(
                "Country {}",
                country.country_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> SeedData {
        SeedData {
            countries: vec![Country::new(1, "India"), Country::new(2, "Japan")],
            states: vec![State::new(1, "Odisha", 1), State::new(2, "Kerala", 1)],
            cities: vec![City::new(1, "Cuttack", 1)],
        }
    }

    #[tokio::test]
    async fn test_listings_filter_by_parent() {
        let store = MemoryStore::from_seed(seed()).unwrap();

        assert_eq!(store.list_countries().await.unwrap().len(), 2);
        assert_eq!(store.list_states(1).await.unwrap().len(), 2);
        assert!(store.list_states(2).await.unwrap().is_empty());
        assert_eq!(
            store.list_cities(1).await.unwrap(),
            vec![City::new(1, "Cuttack", 1)]
        );
    }

    #[tokio::test]
    async fn test_insert_country_assigns_id() {
        let store = MemoryStore::from_seed(seed()).unwrap();

        let id = store.insert_country(Country::new(0, "Peru")).await.unwrap();

        assert_eq!(id, 3);
        assert!(store
            .list_countries()
            .await
            .unwrap()
            .contains(&Country::new(3, "Peru")));
    }

    #[tokio::test]
    async fn test_identity_exhaustion_conflicts() {
        let store = MemoryStore::new();
        store
            .insert_country(Country::new(i32::MAX, "Max"))
            .await
            .unwrap();

        let result = store.insert_country(Country::new(0, "Auto")).await;

        assert!(matches!(result, Err(BackingStoreError::Conflict(_))));
        assert_eq!(store.list_countries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_nested_identity_exhaustion_writes_nothing() {
        let store = MemoryStore::new();
        let mut top = Country::new(1, "Top");
        top.states.push(State::new(i32::MAX, "Edge", 1));
        store.insert_country(top).await.unwrap();

        let mut country = Country::new(2, "Next");
        country.states.push(State::new(0, "Auto", 2));
        let result = store.insert_country(country).await;

        assert!(matches!(result, Err(BackingStoreError::Conflict(_))));
        assert_eq!(store.list_countries().await.unwrap().len(), 1);
        assert!(store.list_states(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_duplicate_country_conflicts() {
        let store = MemoryStore::from_seed(seed()).unwrap();

        let result = store.insert_country(Country::new(1, "Again")).await;
        assert!(matches!(result, Err(BackingStoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_insert_country_with_nested_graph() {
        let store = MemoryStore::new();
        let mut state = State::new(0, "Lima", 99);
        state.cities.push(City::new(0, "Miraflores", 0));
        let mut country = Country::new(7, "Peru");
        country.states.push(state);

        store.insert_country(country).await.unwrap();

        let states = store.list_states(7).await.unwrap();
        assert_eq!(states, vec![State::new(1, "Lima", 7)]);
        let cities = store.list_cities(1).await.unwrap();
        assert_eq!(cities, vec![City::new(1, "Miraflores", 1)]);
        // Listings never carry the nested graph
        assert!(store.list_countries().await.unwrap()[0].states.is_empty());
    }

    #[tokio::test]
    async fn test_failed_nested_insert_writes_nothing() {
        let store = MemoryStore::from_seed(seed()).unwrap();
        let mut country = Country::new(5, "Chile");
        country.states.push(State::new(1, "Clash", 5));

        let result = store.insert_country(country).await;

        assert!(matches!(result, Err(BackingStoreError::Conflict(_))));
        assert_eq!(store.list_countries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_country() {
        let store = MemoryStore::from_seed(seed()).unwrap();

        store.update_country(Country::new(2, "Nippon")).await.unwrap();
        let countries = store.list_countries().await.unwrap();
        assert!(countries.contains(&Country::new(2, "Nippon")));

        let missing = store.update_country(Country::new(3, "Nowhere")).await;
        assert!(matches!(missing, Err(BackingStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let store = MemoryStore::from_seed(seed()).unwrap();

        let orphan_state = store.insert_state(State::new(10, "Ghost", 42)).await;
        assert!(matches!(orphan_state, Err(BackingStoreError::Conflict(_))));

        let orphan_city = store.insert_city(City::new(10, "Ghost", 42)).await;
        assert!(matches!(orphan_city, Err(BackingStoreError::Conflict(_))));

        let id = store.insert_city(City::new(0, "Puri", 1)).await.unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_seed_from_json() {
        let json = r#"{
            "countries": [{"countryId": 1, "name": "India"}],
            "states": [{"stateId": 1, "name": "Odisha", "countryId": 1}]
        }"#;
        let seed: SeedData = serde_json::from_str(json).unwrap();
        assert!(seed.cities.is_empty());
        assert!(MemoryStore::from_seed(seed).is_ok());
    }

    #[test]
    fn test_seed_with_orphan_fails() {
        let seed = SeedData {
            cities: vec![City::new(1, "Nowhere", 9)],
            ..SeedData::default()
        };
        assert!(MemoryStore::from_seed(seed).is_err());
    }
}
