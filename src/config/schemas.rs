/// Configuration schemas - every section defined once, with defaults
///
/// A TOML file only needs the fields it changes:
///
/// ```toml
/// [client]
/// token = "..."
/// cache_size = 50
///
/// [logging]
/// debug_tags = ["cache", "ratelimit"]
/// ```
use crate::apis::client::MAX_RATE_LIMIT;
use crate::cache::{CacheConfig, DEFAULT_CACHE_SIZE, MAX_TTL};
use crate::config_struct;
use crate::errors::{ClientError, ClientResult, ConfigurationError};
use crate::logger::{LogLevel, LoggerConfig};
use std::time::Duration;

/// Public RoyaleAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.royaleapi.com/";

// ============================================================================
// CLIENT CONFIGURATION
// ============================================================================

config_struct! {
    /// Client behavior: endpoint, auth, caching and local rate limiting
    pub struct ClientConfig {
        base_url: String = DEFAULT_BASE_URL.to_string(),

        /// API token sent in the `auth` header
        token: Option<String> = None,

        /// Entries kept per resource store (0 disables caching, negative = unbounded)
        cache_size: i64 = DEFAULT_CACHE_SIZE,

        /// How long a fetched value stays fresh (at most 30 days)
        cache_ttl_secs: u64 = 300,

        /// Requests admitted per rate window (at most 10000)
        rate_limit: usize = 5,

        /// Rate window length in milliseconds
        rate_window_ms: u64 = 1000,

        /// Per-request HTTP timeout
        timeout_secs: u64 = 10,
    }
}

impl ClientConfig {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(self.cache_size, Duration::from_secs(self.cache_ttl_secs))
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_millis(self.rate_window_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.rate_limit == 0 {
            return Err(invalid_field("rate_limit", "must be greater than zero"));
        }
        if self.rate_limit > MAX_RATE_LIMIT {
            let reason = format!("must be at most {}", MAX_RATE_LIMIT);
            return Err(invalid_field("rate_limit", &reason));
        }
        if self.cache_ttl_secs > MAX_TTL.as_secs() {
            let reason = format!("must be at most {} seconds", MAX_TTL.as_secs());
            return Err(invalid_field("cache_ttl_secs", &reason));
        }
        if self.rate_window_ms == 0 {
            return Err(invalid_field("rate_window_ms", "must be greater than zero"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid_field("timeout_secs", "must be greater than zero"));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            ClientError::Configuration(ConfigurationError::InvalidUrl {
                url: self.base_url.clone(),
                error: e.to_string(),
            })
        })?;
        Ok(())
    }
}

fn invalid_field(field: &str, reason: &str) -> ClientError {
    ClientError::Configuration(ConfigurationError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    })
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    /// Console logging
    pub struct LoggingConfig {
        /// Minimum level: error, warning, info, debug, verbose
        level: String = "info".to_string(),

        /// Tags whose debug output is shown (api, cache, ratelimit, client, config)
        debug_tags: Vec<String> = Vec::new(),

        colors: bool = true,
    }
}

impl LoggingConfig {
    /// Logger settings for this section; an unknown level is a config error
    pub fn to_logger_config(&self) -> ClientResult<LoggerConfig> {
        let min_level = self
            .level
            .parse::<LogLevel>()
            .map_err(|reason| invalid_field("logging.level", &reason))?;

        let mut config = LoggerConfig {
            min_level,
            colors: self.colors,
            ..LoggerConfig::default()
        };
        config = config.with_debug_tags(self.debug_tags.iter().map(String::as_str));
        Ok(config)
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    pub struct Config {
        client: ClientConfig = ClientConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
