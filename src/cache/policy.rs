//! Cache Policy Module
//!
//! Expiration modes, priorities, and the fixed category → policy table.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Default lifetime for both the States and Cities policies (30 minutes).
pub const DEFAULT_POLICY_DURATION: Duration = Duration::from_secs(30 * 60);

// == Expiration ==
/// How an entry's deadline is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "secs")]
pub enum Expiration {
    /// Lives until explicitly removed
    Never,
    /// Deadline is `last access + duration`, renewed on every hit
    Sliding(#[serde(serialize_with = "as_secs")] Duration),
    /// Deadline is `creation + duration`, never renewed
    Absolute(#[serde(serialize_with = "as_secs")] Duration),
}

fn as_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}

// == Priority ==
/// Advisory retention priority. Under capacity pressure lower priorities are
/// evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Normal, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Policy ==
/// Expiration mode and priority applied together to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CachePolicy {
    pub expiration: Expiration,
    pub priority: Priority,
}

impl CachePolicy {
    pub const fn new(expiration: Expiration, priority: Priority) -> Self {
        Self {
            expiration,
            priority,
        }
    }

    /// No expiration, high priority.
    pub const fn pinned() -> Self {
        Self::new(Expiration::Never, Priority::High)
    }

    pub const fn sliding(duration: Duration, priority: Priority) -> Self {
        Self::new(Expiration::Sliding(duration), priority)
    }

    pub const fn absolute(duration: Duration, priority: Priority) -> Self {
        Self::new(Expiration::Absolute(duration), priority)
    }
}

// == Category ==
/// Reference-data category; each one is cached under a fixed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Countries,
    States,
    Cities,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Countries, Category::States, Category::Cities];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Countries => "countries",
            Category::States => "states",
            Category::Cities => "cities",
        }
    }
}

// == Policy Table ==
/// Lookup table mapping each category to its policy.
///
/// Only the sliding/absolute durations can vary; modes and priorities are
/// fixed per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyTable {
    countries: CachePolicy,
    states: CachePolicy,
    cities: CachePolicy,
}

impl PolicyTable {
    /// Builds the table with custom States (sliding) and Cities (absolute)
    /// durations.
    pub fn with_durations(states_sliding: Duration, cities_absolute: Duration) -> Self {
        Self {
            countries: CachePolicy::pinned(),
            states: CachePolicy::sliding(states_sliding, Priority::Normal),
            cities: CachePolicy::absolute(cities_absolute, Priority::Low),
        }
    }

    /// Returns the policy for `category`.
    pub fn for_category(&self, category: Category) -> CachePolicy {
        match category {
            Category::Countries => self.countries,
            Category::States => self.states,
            Category::Cities => self.cities,
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::with_durations(DEFAULT_POLICY_DURATION, DEFAULT_POLICY_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = PolicyTable::default();

        assert_eq!(
            table.for_category(Category::Countries),
            CachePolicy::new(Expiration::Never, Priority::High)
        );
        assert_eq!(
            table.for_category(Category::States),
            CachePolicy::new(
                Expiration::Sliding(Duration::from_secs(1800)),
                Priority::Normal
            )
        );
        assert_eq!(
            table.for_category(Category::Cities),
            CachePolicy::new(
                Expiration::Absolute(Duration::from_secs(1800)),
                Priority::Low
            )
        );
    }

    #[test]
    fn test_every_category_has_distinct_priority() {
        let table = PolicyTable::default();
        let mut priorities: Vec<Priority> = Category::ALL
            .iter()
            .map(|c| table.for_category(*c).priority)
            .collect();
        priorities.sort();
        priorities.dedup();
        assert_eq!(priorities.len(), Category::ALL.len());
    }

    #[test]
    fn test_custom_durations_keep_modes() {
        let table = PolicyTable::with_durations(Duration::from_secs(5), Duration::from_secs(7));

        assert_eq!(
            table.for_category(Category::States).expiration,
            Expiration::Sliding(Duration::from_secs(5))
        );
        assert_eq!(
            table.for_category(Category::Cities).expiration,
            Expiration::Absolute(Duration::from_secs(7))
        );
        assert_eq!(
            table.for_category(Category::Countries).expiration,
            Expiration::Never
        );
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Normal);
        assert!(Priority::Normal < Priority::High);
        assert_eq!(Priority::ALL[0], Priority::Low);
    }

    #[test]
    fn test_expiration_serialize() {
        let json = serde_json::to_string(&Expiration::Sliding(Duration::from_secs(60))).unwrap();
        assert_eq!(json, r#"{"mode":"sliding","secs":60}"#);
        let json = serde_json::to_string(&Expiration::Never).unwrap();
        assert_eq!(json, r#"{"mode":"never"}"#);
    }
}
