/// Resource stores and the fetch pipeline they share
///
/// Every cached read goes through `Orchestrator::fetch_cached`:
/// normalize the tag, validate the options, look the key up, pass the rate
/// gate, fetch, map, store. Collection reads use `fetch_collection` and skip
/// the cache entirely.
pub mod clans;
pub mod players;
pub mod tournaments;

pub use clans::{ClanSearch, ClanStore};
pub use players::PlayerStore;
pub use tournaments::TournamentStore;

use crate::apis::{ApiFetcher, ApiRequest, QueryFields, RateLimiter, RequestOptions};
use crate::cache::{expiry_after, CacheCapacity, ExpiringStore, MAX_TTL};
use crate::clock::Clock;
use crate::errors::ClientResult;
use crate::logger::{self, LogTag};
use crate::structures;
use crate::tags::normalize_tag;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Shared pipeline state of one client instance
///
/// The limiter, clock and fetcher are owned here and handed to every store;
/// nothing is process-global.
pub struct Orchestrator {
    fetcher: Arc<dyn ApiFetcher>,
    limiter: Arc<RateLimiter>,
    clock: Arc<dyn Clock>,
    capacity: CacheCapacity,
    ttl: Duration,
}

impl Orchestrator {
    pub fn new(
        fetcher: Arc<dyn ApiFetcher>,
        limiter: Arc<RateLimiter>,
        clock: Arc<dyn Clock>,
        capacity: CacheCapacity,
        ttl: Duration,
    ) -> Self {
        Self {
            fetcher,
            limiter,
            clock,
            capacity,
            ttl: ttl.min(MAX_TTL),
        }
    }

    pub fn fetcher(&self) -> &Arc<dyn ApiFetcher> {
        &self.fetcher
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A new, empty store sized by the client's cache configuration
    pub fn new_store<T: Clone>(&self, name: &'static str) -> ExpiringStore<T> {
        ExpiringStore::new(name, self.capacity, Arc::clone(&self.clock))
    }

    /// Cached single-resource read
    ///
    /// Invalid tags and options fail before the cache, the limiter or the
    /// network are touched. A fresh hit returns without consuming a rate
    /// slot. Failures are never cached.
    pub async fn fetch_cached<T, F>(
        &self,
        store: &ExpiringStore<Arc<T>>,
        raw_tag: &str,
        endpoint: F,
        options: &RequestOptions,
    ) -> ClientResult<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync,
        F: FnOnce(&str) -> String,
    {
        let tag = normalize_tag(raw_tag)?;
        let fields = options.validate()?;
        let key = cache_key(&tag, &fields);

        if let Some(hit) = store.lookup(&key) {
            logger::debug(LogTag::Cache, &format!("{} hit for {}", store.name(), key));
            return Ok(hit);
        }

        let request = ApiRequest::new(endpoint(&tag), &fields);
        let raw = self.fetch_raw(&request).await?;
        let value: Arc<T> = Arc::new(structures::from_raw(&request.endpoint, raw)?);

        // Expiry is fixed when the object is built, not when the store runs.
        match expiry_after(self.clock.now(), self.ttl) {
            Some(expires_at) => Ok(store.store_until(&key, value, expires_at)),
            None => Ok(value),
        }
    }

    /// Uncached read of a list endpoint, mapped element by element
    pub async fn fetch_collection<T>(&self, request: ApiRequest) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let raw = self.fetch_raw(&request).await?;
        structures::from_raw_list(&request.endpoint, raw)
    }

    /// Uncached read of a single object
    pub async fn fetch_object<T>(&self, request: ApiRequest) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let raw = self.fetch_raw(&request).await?;
        structures::from_raw(&request.endpoint, raw)
    }

    /// Rate gate, then the network. The only suspension point of a read.
    async fn fetch_raw(&self, request: &ApiRequest) -> ClientResult<serde_json::Value> {
        if let Err(e) = self.limiter.try_acquire() {
            logger::warning(
                LogTag::RateLimit,
                &format!("Request to {} rejected: {}", request.endpoint, e),
            );
            return Err(e);
        }

        self.fetcher.fetch_json(request).await
    }
}

/// Cache key of a tag under a field selection
///
/// Filtered responses are partial objects, so they are kept apart from the
/// full one and from each other.
pub fn cache_key(tag: &str, fields: &QueryFields) -> String {
    match fields.query_pairs().first() {
        None => tag.to_string(),
        Some((name, value)) => format!("{}?{}={}", tag, name, value),
    }
}
