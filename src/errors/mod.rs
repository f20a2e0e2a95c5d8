/// Error handling for the RoyaleAPI client
///
/// Every public operation either returns a fully mapped domain object or one
/// of the variants below. Nothing is retried automatically; `is_retryable()`
/// tells callers which failures are worth a backoff-and-retry.

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    // Tag / location failed normalization
    InvalidKey(TagError),

    // Both `keys` and `exclude` given, or a non-list value for either
    InvalidOptions { reason: String },

    // Local sliding-window governor rejected the request
    RateLimit(RateLimitError),

    // Transport failures and non-success HTTP statuses
    Network(NetworkError),

    // Payload did not map onto the expected domain object
    Data(DataError),

    // Missing token, unreadable config file, bad base URL
    Configuration(ConfigurationError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::InvalidKey(e) => write!(f, "Invalid Key: {}", e),
            ClientError::InvalidOptions { reason } => write!(f, "Invalid Options: {}", reason),
            ClientError::RateLimit(e) => write!(f, "Rate Limit Error: {}", e),
            ClientError::Network(e) => write!(f, "Network Error: {}", e),
            ClientError::Data(e) => write!(f, "Data Error: {}", e),
            ClientError::Configuration(e) => write!(f, "Configuration Error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// Short label for log lines and stats
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::InvalidKey(_) => "invalid_key",
            ClientError::InvalidOptions { .. } => "invalid_options",
            ClientError::RateLimit(_) => "rate_limit",
            ClientError::Network(_) => "network",
            ClientError::Data(_) => "data",
            ClientError::Configuration(_) => "configuration",
        }
    }

    /// Whether waiting and calling again can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::RateLimit(_) => true,
            ClientError::Network(NetworkError::ConnectionTimeout { .. }) => true,
            ClientError::Network(NetworkError::HttpStatusError { status, .. }) => {
                *status == 429 || *status >= 500
            }
            ClientError::Network(NetworkError::Generic { .. }) => true,
            _ => false,
        }
    }

    pub fn invalid_options(reason: impl Into<String>) -> Self {
        ClientError::InvalidOptions {
            reason: reason.into(),
        }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        ClientError::Configuration(ConfigurationError::Generic {
            message: message.into(),
        })
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        ClientError::Network(NetworkError::Generic {
            message: message.into(),
        })
    }

    pub fn parse_error(endpoint: impl Into<String>, error: impl Into<String>) -> Self {
        ClientError::Data(DataError::ParseError {
            endpoint: endpoint.into(),
            error: error.into(),
        })
    }
}

// =============================================================================
// TAG ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TagError {
    Empty,
    InvalidCharacter { tag: String, character: char, position: usize },
}

impl std::fmt::Display for TagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagError::Empty => write!(f, "a tag must be provided"),
            TagError::InvalidCharacter {
                tag,
                character,
                position,
            } => write!(
                f,
                "tag '{}' has invalid character '{}' at position {} (allowed: {})",
                tag,
                character,
                position,
                crate::tags::TAG_CHARACTERS.iter().collect::<String>()
            ),
        }
    }
}

impl From<TagError> for ClientError {
    fn from(err: TagError) -> Self {
        ClientError::InvalidKey(err)
    }
}

// =============================================================================
// RATE LIMIT ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RateLimitError {
    Exceeded { limit: usize, window_ms: u64 },
}

impl std::fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateLimitError::Exceeded { limit, window_ms } => write!(
                f,
                "do not make more than {} requests every {}ms",
                limit, window_ms
            ),
        }
    }
}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    ConnectionTimeout {
        endpoint: String,
        timeout_ms: u64,
    },
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::ConnectionTimeout {
                endpoint,
                timeout_ms,
            } => {
                write!(
                    f,
                    "Connection timeout to {} after {}ms",
                    endpoint, timeout_ms
                )
            }
            NetworkError::HttpStatusError {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "HTTP {} from {}: {}",
                    status,
                    endpoint,
                    body.as_deref().unwrap_or("No body")
                )
            }
            NetworkError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    ParseError { endpoint: String, error: String },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::ParseError { endpoint, error } => {
                write!(f, "Failed to parse response of {}: {}", endpoint, error)
            }
        }
    }
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    MissingToken,
    InvalidConfig { field: String, reason: String },
    InvalidUrl { url: String, error: String },
    Generic { message: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::MissingToken => write!(
                f,
                "a RoyaleAPI token is required (get one from https://royaleapi.com)"
            ),
            ConfigurationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigurationError::InvalidUrl { url, error } => {
                write!(f, "Invalid URL '{}': {}", url, error)
            }
            ConfigurationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().trim_start_matches('/').to_string())
            .unwrap_or_default();

        if err.is_timeout() {
            return ClientError::Network(NetworkError::ConnectionTimeout {
                endpoint,
                timeout_ms: 0,
            });
        }

        if let Some(status) = err.status() {
            return ClientError::Network(NetworkError::HttpStatusError {
                endpoint,
                status: status.as_u16(),
                body: None,
            });
        }

        ClientError::Network(NetworkError::Generic {
            message: format!("HTTP request failed: {}", err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let limited = ClientError::RateLimit(RateLimitError::Exceeded {
            limit: 5,
            window_ms: 1000,
        });
        assert!(limited.is_retryable());

        let not_found = ClientError::Network(NetworkError::HttpStatusError {
            endpoint: "player/2CCCP".to_string(),
            status: 404,
            body: None,
        });
        assert!(!not_found.is_retryable());

        let unavailable = ClientError::Network(NetworkError::HttpStatusError {
            endpoint: "player/2CCCP".to_string(),
            status: 503,
            body: None,
        });
        assert!(unavailable.is_retryable());

        assert!(!ClientError::invalid_options("both").is_retryable());
        assert!(!ClientError::InvalidKey(TagError::Empty).is_retryable());
    }

    #[test]
    fn test_display_carries_limit_and_window() {
        let err = ClientError::RateLimit(RateLimitError::Exceeded {
            limit: 5,
            window_ms: 1000,
        });
        let text = err.to_string();
        assert!(text.contains("5 requests"));
        assert!(text.contains("1000ms"));
        assert_eq!(err.error_type(), "rate_limit");
    }
}
