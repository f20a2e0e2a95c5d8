/// Per-client request statistics
use crate::logger::{self, LogTag};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time_ms: f64,
    pub last_error: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
}

impl ApiStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64 * 100.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ApiStatsTracker {
    inner: Mutex<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, success: bool, elapsed_ms: f64) {
        let mut stats = self.inner.lock();
        let previous = stats.total_requests as f64;
        stats.total_requests += 1;
        if success {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
        stats.average_response_time_ms =
            (stats.average_response_time_ms * previous + elapsed_ms) / stats.total_requests as f64;
    }

    pub fn record_error(&self, api: &str, endpoint: &str, message: String) {
        logger::error(
            LogTag::Api,
            &format!("{} {} failed: {}", api, endpoint, message),
        );
        let mut stats = self.inner.lock();
        stats.last_error = Some(message);
        stats.last_error_at = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ApiStats {
        self.inner.lock().clone()
    }
}
