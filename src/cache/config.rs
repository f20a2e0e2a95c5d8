/// Cache configuration per resource type
///
/// Every resource store of a client shares the same capacity and TTL,
/// configured once from `ClientConfig`:
/// - `cache_size == 0`: caching disabled, values are returned unstored
/// - `cache_size > 0`: at most that many entries, oldest-inserted evicted first
/// - `cache_size < 0`: unbounded, nothing is ever evicted
use std::num::NonZeroUsize;
use std::time::Duration;

/// Default number of entries kept per resource store
pub const DEFAULT_CACHE_SIZE: i64 = 25;

/// Default time a fetched value stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Longest time an entry may stay fresh; larger TTLs are clamped to it
pub const MAX_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCapacity {
    Disabled,
    Bounded(NonZeroUsize),
    Unbounded,
}

impl CacheCapacity {
    pub fn from_size(size: i64) -> Self {
        if size < 0 {
            return CacheCapacity::Unbounded;
        }
        match NonZeroUsize::new(size as usize) {
            Some(n) => CacheCapacity::Bounded(n),
            None => CacheCapacity::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, CacheCapacity::Disabled)
    }

    /// Maximum entry count, `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            CacheCapacity::Disabled => Some(0),
            CacheCapacity::Bounded(n) => Some(n.get()),
            CacheCapacity::Unbounded => None,
        }
    }
}

impl Default for CacheCapacity {
    fn default() -> Self {
        CacheCapacity::from_size(DEFAULT_CACHE_SIZE)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Time-to-live for cached entries
    pub ttl: Duration,

    /// Maximum number of entries (FIFO eviction when exceeded)
    pub capacity: CacheCapacity,
}

impl CacheConfig {
    pub fn new(cache_size: i64, ttl: Duration) -> Self {
        Self {
            ttl,
            capacity: CacheCapacity::from_size(cache_size),
        }
    }

    pub fn disabled() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: CacheCapacity::Disabled,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: CacheCapacity::default(),
        }
    }
}
