//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::PolicyTable;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// Sliding window for the States policy, in seconds
    pub states_sliding_secs: u64,
    /// Absolute lifetime for the Cities policy, in seconds
    pub cities_absolute_secs: u64,
    /// Optional JSON file used to seed the in-memory backing store
    pub seed_file: Option<PathBuf>,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `STATES_SLIDING_SECS` - States sliding window (default: 1800)
    /// - `CITIES_ABSOLUTE_SECS` - Cities absolute lifetime (default: 1800)
    /// - `SEED_FILE` - Seed data path (default: unset, empty store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            states_sliding_secs: env_or("STATES_SLIDING_SECS", defaults.states_sliding_secs),
            cities_absolute_secs: env_or("CITIES_ABSOLUTE_SECS", defaults.cities_absolute_secs),
            seed_file: env::var_os("SEED_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Builds the category policy table from the configured durations.
    pub fn policy_table(&self) -> PolicyTable {
        PolicyTable::with_durations(
            Duration::from_secs(self.states_sliding_secs),
            Duration::from_secs(self.cities_absolute_secs),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_entries: 1000,
            cleanup_interval: 60,
            states_sliding_secs: 1800,
            cities_absolute_secs: 1800,
            seed_file: None,
        }
    }
}
