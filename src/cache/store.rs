//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with policy-driven expiration
//! and priority-aware eviction.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CachePolicy, CacheStats, EvictionTracker};

// == Entry Info ==
/// Read-only view of an entry's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub policy: CachePolicy,
    /// Seconds since the entry was stored
    pub age_secs: u64,
    /// Seconds until expiry, None = never expires
    pub ttl_remaining_secs: Option<u64>,
}

#[derive(Debug)]
struct StoreState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    tracker: EvictionTracker,
    /// Invalidation generation per key, bumped by every remove
    generations: HashMap<String, u64>,
    stats: CacheStats,
}

// == Cache Store ==
/// Thread-safe key/value cache with per-entry expiration and priority.
///
/// All state lives behind one mutex, so every operation is atomic with
/// respect to the others: a value is never visible with another write's
/// policy, and a `set` is visible to the next `try_get` on any task.
#[derive(Debug)]
pub struct CacheStore<V> {
    state: Mutex<StoreState<V>>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries
    /// (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: Mutex::new(StoreState {
                entries: HashMap::new(),
                tracker: EvictionTracker::new(),
                generations: HashMap::new(),
                stats: CacheStats::new(),
            }),
            max_entries: max_entries.max(1),
        }
    }

    // == Try Get ==
    /// Retrieves a live value by key.
    ///
    /// Returns None if the key is absent or expired. Expired entries are
    /// removed on the spot. A hit renews sliding entries.
    pub fn try_get(&self, key: &str) -> Option<V> {
        self.try_get_at(key, Instant::now())
    }

    pub fn try_get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut state = self.state.lock();
        let Some(expired) = state.entries.get(key).map(|e| e.is_expired_at(now)) else {
            state.stats.record_miss();
            return None;
        };

        if expired {
            state.entries.remove(key);
            state.tracker.remove(key);
            state.stats.record_expirations(1);
            state.stats.record_miss();
            let len = state.entries.len();
            state.stats.set_total_entries(len);
            debug!(key, "cache entry expired");
            return None;
        }

        let StoreState {
            entries,
            tracker,
            stats,
            ..
        } = &mut *state;
        let entry = entries.get_mut(key)?;
        entry.touch(now);
        tracker.touch(key, entry.priority());
        stats.record_hit();
        Some(entry.value.clone())
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`.
    ///
    /// Value and policy are replaced together. If the key is new and the
    /// store is full, expired entries are purged first, then the lowest
    /// priority / least recently used entries are evicted.
    pub fn set(&self, key: impl Into<String>, value: V, policy: CachePolicy) {
        self.set_at(key, value, policy, Instant::now());
    }

    pub fn set_at(&self, key: impl Into<String>, value: V, policy: CachePolicy, now: Instant) {
        let mut state = self.state.lock();
        self.insert_locked(&mut state, key.into(), value, policy, now);
    }

    // == Ticket ==
    /// Returns the current invalidation generation of `key`.
    ///
    /// Take a ticket before fetching a value from the backing store and hand
    /// it to [`CacheStore::set_if_current`].
    pub fn ticket(&self, key: &str) -> u64 {
        self.state.lock().generations.get(key).copied().unwrap_or(0)
    }

    // == Set If Current ==
    /// Like [`CacheStore::set`], but only stores the value if `key` has not
    /// been removed since `ticket` was taken. Returns whether it was stored.
    pub fn set_if_current(
        &self,
        key: impl Into<String>,
        value: V,
        policy: CachePolicy,
        ticket: u64,
    ) -> bool {
        self.set_if_current_at(key, value, policy, ticket, Instant::now())
    }

    pub fn set_if_current_at(
        &self,
        key: impl Into<String>,
        value: V,
        policy: CachePolicy,
        ticket: u64,
        now: Instant,
    ) -> bool {
        let key = key.into();
        let mut state = self.state.lock();
        let current = state.generations.get(&key).copied().unwrap_or(0);
        if current != ticket {
            debug!(key = %key, ticket, current, "skipping set for invalidated key");
            return false;
        }
        self.insert_locked(&mut state, key, value, policy, now);
        true
    }

    // == Remove ==
    /// Removes an entry by key. Removing an absent key is a no-op.
    ///
    /// Always bumps the key's generation so in-flight read-throughs that
    /// started earlier cannot re-insert their result. Returns whether an
    /// entry was present.
    pub fn remove(&self, key: &str) -> bool {
        let mut state = self.state.lock();
        *state.generations.entry(key.to_string()).or_insert(0) += 1;

        let removed = state.entries.remove(key).is_some();
        if removed {
            state.tracker.remove(key);
            state.stats.record_invalidation();
            let len = state.entries.len();
            state.stats.set_total_entries(len);
        }
        removed
    }

    // == Inspect ==
    /// Returns metadata for a live entry without renewing it or touching the
    /// hit/miss counters.
    pub fn inspect(&self, key: &str) -> Option<EntryInfo> {
        self.inspect_at(key, Instant::now())
    }

    pub fn inspect_at(&self, key: &str, now: Instant) -> Option<EntryInfo> {
        let state = self.state.lock();
        let entry = state.entries.get(key)?;
        if entry.is_expired_at(now) {
            return None;
        }
        Some(EntryInfo {
            key: key.to_string(),
            policy: entry.policy,
            age_secs: now.saturating_duration_since(entry.created_at).as_secs(),
            ttl_remaining_secs: entry.ttl_remaining_at(now).map(|d| d.as_secs()),
        })
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut state = self.state.lock();
        Self::purge_locked(&mut state, now)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries not
    /// yet purged.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    fn insert_locked(
        &self,
        state: &mut StoreState<V>,
        key: String,
        value: V,
        policy: CachePolicy,
        now: Instant,
    ) {
        if !state.entries.contains_key(&key) && state.entries.len() >= self.max_entries {
            Self::purge_locked(state, now);

            while state.entries.len() >= self.max_entries {
                let Some(victim) = state.tracker.evict() else {
                    break;
                };
                state.entries.remove(&victim);
                state.stats.record_eviction();
                debug!(key = %victim, "evicted cache entry under capacity pressure");
            }
        }

        state.tracker.touch(&key, policy.priority);
        state
            .entries
            .insert(key, CacheEntry::new(value, policy, now));
        let len = state.entries.len();
        state.stats.set_total_entries(len);
    }

    fn purge_locked(state: &mut StoreState<V>, now: Instant) -> usize {
        let expired_keys: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            state.entries.remove(&key);
            state.tracker.remove(&key);
        }

        state.stats.record_expirations(count);
        let len = state.entries.len();
        state.stats.set_total_entries(len);
        count
    }
}
