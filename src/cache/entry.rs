//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with policy-driven
//! expiration.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CachePolicy, Expiration, Priority};

// == Cache Entry ==
/// Represents a single cache entry with value and policy metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration mode and priority, replaced together with the value
    pub policy: CachePolicy,
    /// When the entry was stored
    pub created_at: Instant,
    /// Last successful read (or creation)
    pub last_accessed: Instant,
    /// Deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

/// `now + window`; a deadline past the clock's range means no expiration.
fn deadline(now: Instant, window: Duration) -> Option<Instant> {
    now.checked_add(window)
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry whose deadline is derived from `policy`.
    pub fn new(value: V, policy: CachePolicy, now: Instant) -> Self {
        let expires_at = match policy.expiration {
            Expiration::Never => None,
            Expiration::Sliding(d) | Expiration::Absolute(d) => deadline(now, d),
        };

        Self {
            value,
            policy,
            created_at: now,
            last_accessed: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so a read exactly at the
    /// deadline already misses.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Touch ==
    /// Records a successful read. Sliding entries get their deadline pushed
    /// to `now + duration`; absolute deadlines are left alone.
    pub fn touch(&mut self, now: Instant) {
        self.last_accessed = now;
        if let Expiration::Sliding(d) = self.policy.expiration {
            self.expires_at = deadline(now, d);
        }
    }

    /// Shortcut for the entry's priority.
    pub fn priority(&self) -> Priority {
        self.policy.priority
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, or None if the entry never
    /// expires. Expired entries report zero.
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
