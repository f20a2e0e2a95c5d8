/// External API access: the fetch abstraction, its HTTP implementation and
/// the local rate limiter placed in front of it
pub mod client;
pub mod options;
pub mod request;
pub mod royale;
pub mod stats;

pub use client::{HttpClient, RateLimiter, DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW};
pub use options::{QueryFields, RequestOptions};
pub use request::ApiRequest;
pub use royale::RoyaleApiClient;
pub use stats::{ApiStats, ApiStatsTracker};

use crate::errors::ClientResult;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Remote rate-limit state as last reported by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    /// Calls left in the server-side window
    pub remaining: Option<u32>,
    /// Server-reported timestamp at which its window resets
    pub reset_at: Option<i64>,
}

/// Fetches raw JSON for one request
///
/// The only suspension point of a client operation. Implementations must not
/// retry or cache; they report transport failures and non-success statuses
/// as `ClientError::Network`.
#[async_trait]
pub trait ApiFetcher: Send + Sync {
    async fn fetch_json(&self, request: &ApiRequest) -> ClientResult<Value>;

    fn rate_limits(&self) -> RateLimitInfo {
        RateLimitInfo::default()
    }

    fn get_stats(&self) -> Option<ApiStats> {
        None
    }
}
