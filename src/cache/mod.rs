//! Cache Module
//!
//! Provides a thread-safe in-memory cache with per-entry expiration policies
//! (none, sliding, absolute) and priority-aware eviction.

mod entry;
mod eviction;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use eviction::EvictionTracker;
pub use policy::{
    CachePolicy, Category, Expiration, PolicyTable, Priority, DEFAULT_POLICY_DURATION,
};
pub use stats::CacheStats;
pub use store::{CacheStore, EntryInfo};
