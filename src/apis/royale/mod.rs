/// RoyaleAPI HTTP client
///
/// API Documentation: https://docs.royaleapi.com
///
/// Every request carries the `auth` header. Responses are returned as raw
/// JSON; mapping into domain objects happens in the resource stores. The
/// `x-ratelimit-remaining` / `x-ratelimit-reset` headers of the last response
/// are kept for `rate_limits()`.
pub mod endpoints;

use super::client::HttpClient;
use super::request::ApiRequest;
use super::stats::{ApiStats, ApiStatsTracker};
use super::{ApiFetcher, RateLimitInfo};
use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult, ConfigurationError, NetworkError};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Instant;
use url::Url;

const API_NAME: &str = "RoyaleAPI";

pub struct RoyaleApiClient {
    http: HttpClient,
    base_url: Url,
    stats: ApiStatsTracker,
    rate_limits: Mutex<RateLimitInfo>,
}

impl RoyaleApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let token = config
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ClientError::Configuration(ConfigurationError::MissingToken))?;

        // Url::join drops the last path segment unless the base ends with '/'
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            ClientError::Configuration(ConfigurationError::InvalidUrl {
                url: config.base_url.clone(),
                error: e.to_string(),
            })
        })?;

        Ok(Self {
            http: HttpClient::new(config.timeout_secs, token)?,
            base_url,
            stats: ApiStatsTracker::new(),
            rate_limits: Mutex::new(RateLimitInfo::default()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn capture_rate_limit_headers(&self, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
        };

        let remaining = header("x-ratelimit-remaining").and_then(|v| v.parse::<u32>().ok());
        let reset_at = header("x-ratelimit-reset").and_then(|v| v.parse::<i64>().ok());

        if remaining.is_some() || reset_at.is_some() {
            let mut info = self.rate_limits.lock();
            info.remaining = remaining;
            info.reset_at = reset_at;
        }
    }

    fn transport_error(&self, endpoint: &str, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            return ClientError::Network(NetworkError::ConnectionTimeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.http.timeout().as_millis() as u64,
            });
        }
        ClientError::from(err)
    }
}

#[async_trait]
impl ApiFetcher for RoyaleApiClient {
    async fn fetch_json(&self, request: &ApiRequest) -> ClientResult<Value> {
        let endpoint = request.endpoint.as_str();
        let url = self.base_url.join(endpoint).map_err(|e| {
            ClientError::Configuration(ConfigurationError::InvalidUrl {
                url: format!("{}{}", self.base_url, endpoint),
                error: e.to_string(),
            })
        })?;

        let mut builder = self.http.client().get(url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        logger::debug(
            LogTag::Api,
            &format!("Requesting {} {:?}", endpoint, request.query),
        );

        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let elapsed = start.elapsed().as_millis() as f64;
                self.stats.record_request(false, elapsed);
                let error = self.transport_error(endpoint, err);
                self.stats
                    .record_error(API_NAME, endpoint, error.to_string());
                return Err(error);
            }
        };
        let elapsed = start.elapsed().as_millis() as f64;

        self.capture_rate_limit_headers(response.headers());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            self.stats.record_request(false, elapsed);
            let error = ClientError::Network(NetworkError::HttpStatusError {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
            self.stats
                .record_error(API_NAME, endpoint, error.to_string());
            return Err(error);
        }

        match response.json::<Value>().await {
            Ok(value) => {
                self.stats.record_request(true, elapsed);
                logger::verbose(LogTag::Api, &format!("{} -> {}", endpoint, value));
                Ok(value)
            }
            Err(err) => {
                self.stats.record_request(false, elapsed);
                let error = ClientError::parse_error(endpoint, err.to_string());
                self.stats
                    .record_error(API_NAME, endpoint, error.to_string());
                Err(error)
            }
        }
    }

    fn rate_limits(&self) -> RateLimitInfo {
        *self.rate_limits.lock()
    }

    fn get_stats(&self) -> Option<ApiStats> {
        Some(self.stats.get_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_required() {
        let config = ClientConfig::default();
        assert!(matches!(
            RoyaleApiClient::new(&config),
            Err(ClientError::Configuration(ConfigurationError::MissingToken))
        ));

        let config = ClientConfig {
            token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(RoyaleApiClient::new(&config).is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig {
            token: Some("secret".to_string()),
            base_url: "http://localhost:8080/v1".to_string(),
            ..Default::default()
        };
        let client = RoyaleApiClient::new(&config).unwrap();
        assert_eq!(
            client.base_url().join("player/2CCCP").unwrap().as_str(),
            "http://localhost:8080/v1/player/2CCCP"
        );
    }

    #[test]
    fn test_header_capture() {
        let config = ClientConfig {
            token: Some("secret".to_string()),
            ..Default::default()
        };
        let client = RoyaleApiClient::new(&config).unwrap();
        assert_eq!(client.rate_limits(), RateLimitInfo::default());

        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", "4".parse().unwrap());
        headers.insert("x-ratelimit-reset", "1529490823".parse().unwrap());
        client.capture_rate_limit_headers(&headers);

        let info = client.rate_limits();
        assert_eq!(info.remaining, Some(4));
        assert_eq!(info.reset_at, Some(1529490823));
    }
}
