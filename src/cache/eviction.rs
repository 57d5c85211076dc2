//! Eviction Tracker Module
//!
//! Chooses which entry to discard under capacity pressure: lowest priority
//! first, least recently used first within a priority.

use std::collections::VecDeque;

use crate::cache::Priority;

// == Eviction Tracker ==
/// Tracks access order per priority tier.
///
/// Each tier is a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct EvictionTracker {
    /// Indexed by `Priority as usize` (low, normal, high)
    tiers: [VecDeque<String>; 3],
}

impl EvictionTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    fn tier_mut(&mut self, priority: Priority) -> &mut VecDeque<String> {
        &mut self.tiers[priority as usize]
    }

    // == Touch ==
    /// Marks a key as recently used in `priority`'s tier.
    ///
    /// The key is removed from every tier first, so re-setting a key with a
    /// different priority moves it.
    pub fn touch(&mut self, key: &str, priority: Priority) {
        self.remove(key);
        self.tier_mut(priority).push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        for tier in self.tiers.iter_mut() {
            tier.retain(|k| k != key);
        }
    }

    // == Evict ==
    /// Returns and removes the next eviction victim: the least recently used
    /// key of the lowest non-empty priority.
    pub fn evict(&mut self) -> Option<String> {
        Priority::ALL
            .iter()
            .find_map(|p| self.tiers[*p as usize].pop_back())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(VecDeque::len).sum()
    }

    /// Returns true when no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tracked keys with `priority`.
    pub fn count(&self, priority: Priority) -> usize {
        self.tiers[priority as usize].len()
    }
}
