/// Sliding-window rate limiter and the base HTTP client
use crate::clock::Clock;
use crate::errors::{ClientError, ClientResult, ConfigurationError, RateLimitError};
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default requests admitted per window
pub const DEFAULT_RATE_LIMIT: usize = 5;

/// Default window length
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_millis(1000);

/// Largest accepted `rate_limit`
pub const MAX_RATE_LIMIT: usize = 10_000;

/// Timestamp slots reserved up front; the window grows past this on demand
const PREALLOCATED_SLOTS: usize = 64;

/// Local request-rate governor
///
/// Keeps the instants of accepted requests inside the trailing window and
/// rejects a new attempt once `limit` of them are still in the window. It
/// never waits: a rejected caller gets `RateLimitError::Exceeded` right away
/// and decides on its own backoff.
///
/// At most `limit` requests are admitted in any window, so with the defaults
/// (5 per 1000ms) the 6th call inside one second is rejected.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    requests: Mutex<VecDeque<Instant>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window,
            requests: Mutex::new(VecDeque::with_capacity(limit.min(PREALLOCATED_SLOTS))),
            clock,
        }
    }

    /// Record a request attempt, or reject it without recording
    pub fn try_acquire(&self) -> ClientResult<()> {
        let now = self.clock.now();
        let mut requests = self.requests.lock();
        self.prune(&mut requests, now);

        if requests.len() >= self.limit {
            logger::warning(
                LogTag::RateLimit,
                &format!(
                    "Request rejected: {} requests already in the last {}ms (limit {})",
                    requests.len(),
                    self.window.as_millis(),
                    self.limit
                ),
            );
            return Err(ClientError::RateLimit(RateLimitError::Exceeded {
                limit: self.limit,
                window_ms: self.window.as_millis() as u64,
            }));
        }

        requests.push_back(now);
        logger::debug(
            LogTag::RateLimit,
            &format!("Request admitted ({}/{} in window)", requests.len(), self.limit),
        );
        Ok(())
    }

    /// Accepted requests still counting against the window
    pub fn in_window(&self) -> usize {
        let now = self.clock.now();
        let mut requests = self.requests.lock();
        self.prune(&mut requests, now);
        requests.len()
    }

    /// Requests that would still be admitted right now
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.in_window())
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Timestamps are pushed in increasing order, so stale ones form a prefix
    fn prune(&self, requests: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = requests.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                requests.pop_front();
            } else {
                break;
            }
        }
    }
}

/// reqwest client preconfigured with the request timeout and `auth` header
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, token: &str) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(token).map_err(|e| {
            ClientError::Configuration(ConfigurationError::InvalidConfig {
                field: "token".to_string(),
                reason: e.to_string(),
            })
        })?;
        headers.insert("auth", auth);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ClientError::configuration_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
