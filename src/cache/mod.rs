/// In-memory caching of fetched resources
///
/// One `ExpiringStore` per resource type, all sharing the client's clock,
/// capacity and TTL. Nothing is persisted across process restarts.
pub mod config;
pub mod store;

pub use config::{CacheCapacity, CacheConfig, DEFAULT_CACHE_SIZE, DEFAULT_TTL, MAX_TTL};
pub use store::{expiry_after, CacheEntry, ExpiringStore};

use serde::Serialize;

/// Cache statistics for a single resource store
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub name: &'static str,
    pub total_entries: usize,
    pub expired_entries: usize,
    pub capacity: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
