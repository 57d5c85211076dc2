//! Location Models
//!
//! Reference-data records held by the backing store: countries own states,
//! states own cities.

use serde::{Deserialize, Serialize};

// == Country ==
/// A country and, optionally, the states it owns.
///
/// `states` is only populated on insert payloads; listings from the backing
/// store return it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Unique, stable identifier (0 = let the store assign one)
    pub country_id: i32,
    /// Display name
    pub name: String,
    /// Owned states
    #[serde(default)]
    pub states: Vec<State>,
}

impl Country {
    /// Creates a country with no nested states.
    pub fn new(country_id: i32, name: impl Into<String>) -> Self {
        Self {
            country_id,
            name: name.into(),
            states: Vec::new(),
        }
    }
}

// == State ==
/// A state belonging to a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub state_id: i32,
    pub name: String,
    /// Foreign key to [`Country::country_id`]
    pub country_id: i32,
    #[serde(default)]
    pub cities: Vec<City>,
}

impl State {
    /// Creates a state with no nested cities.
    pub fn new(state_id: i32, name: impl Into<String>, country_id: i32) -> Self {
        Self {
            state_id,
            name: name.into(),
            country_id,
            cities: Vec::new(),
        }
    }
}

// == City ==
/// A city belonging to a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub city_id: i32,
    pub name: String,
    /// Foreign key to [`State::state_id`]
    pub state_id: i32,
}

impl City {
    pub fn new(city_id: i32, name: impl Into<String>, state_id: i32) -> Self {
        Self {
            city_id,
            name: name.into(),
            state_id,
        }
    }
}
