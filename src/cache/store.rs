/// Insertion-ordered expiring store used by every resource type
use super::config::{CacheCapacity, MAX_TTL};
use super::CacheStats;
use crate::clock::Clock;
use crate::logger::{self, LogTag};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Expiry `ttl` after `now`, with `ttl` clamped to `MAX_TTL`
///
/// `None` only when even the clamped instant is not representable.
pub fn expiry_after(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl.min(MAX_TTL))
}

/// A stored value and the instant it stops being fresh
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Key/value store with per-entry expiry and FIFO eviction
///
/// Stale entries are never purged by `lookup`; they sit in place until the
/// next `store` for the same key overwrites them, or until they reach the
/// front of the insertion order and are evicted. Lookups never change the
/// eviction order.
pub struct ExpiringStore<T> {
    name: &'static str,
    entries: Mutex<IndexMap<String, CacheEntry<T>>>,
    capacity: CacheCapacity,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<T: Clone> ExpiringStore<T> {
    pub fn new(name: &'static str, capacity: CacheCapacity, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            entries: Mutex::new(IndexMap::new()),
            capacity,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> CacheCapacity {
        self.capacity
    }

    /// Fresh value for `key`, or `None` on a miss or a stale entry
    pub fn lookup(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_fresh_at(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `value` for `ttl` from now and return it
    pub fn store(&self, key: &str, value: T, ttl: Duration) -> T {
        match expiry_after(self.clock.now(), ttl) {
            Some(expires_at) => self.store_until(key, value, expires_at),
            None => value,
        }
    }

    /// Store `value` with an expiry computed by the caller and return it
    pub fn store_until(&self, key: &str, value: T, expires_at: Instant) -> T {
        let limit = match self.capacity {
            CacheCapacity::Disabled => return value,
            CacheCapacity::Bounded(n) => Some(n.get()),
            CacheCapacity::Unbounded => None,
        };

        let mut entries = self.entries.lock();

        if let Some(limit) = limit {
            if entries.len() >= limit && !entries.contains_key(key) {
                if let Some((evicted, _)) = entries.shift_remove_index(0) {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    logger::debug(
                        LogTag::Cache,
                        &format!(
                            "{}: evicted oldest entry {} (capacity {})",
                            self.name, evicted, limit
                        ),
                    );
                }
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                expires_at,
            },
        );

        value
    }

    /// Remove `key` regardless of freshness
    pub fn evict(&self, key: &str) -> Option<T> {
        let removed = self.entries.lock().shift_remove(key);
        if removed.is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        removed.map(|entry| entry.value)
    }

    /// Drop every stale entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh_at(now));
        let removed = before - entries.len();
        self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        self.evictions.fetch_add(entries.len() as u64, Ordering::Relaxed);
        entries.clear();
    }

    /// Resident entries, fresh or not
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Resident keys in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn contains_fresh(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(key)
            .map(|entry| entry.is_fresh_at(now))
            .unwrap_or(false)
    }

    pub fn get_stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.lock();
        let expired_entries = entries.values().filter(|e| !e.is_fresh_at(now)).count();

        CacheStats {
            name: self.name,
            total_entries: entries.len(),
            expired_entries,
            capacity: self.capacity.limit(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
