//! Structured logging for the RoyaleAPI client
//!
//! Same ergonomics everywhere in the crate:
//!
//! ```rust
//! use royale_client::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::RateLimit, "Request rejected by local governor");
//! logger::info(LogTag::Client, "Client ready");
//! logger::debug(LogTag::Cache, "Cache hit for 2CCCP"); // Only if the cache tag is in debug mode
//! logger::verbose(LogTag::Api, "Raw payload: ..."); // Only with verbose enabled
//! ```
//!
//! Output goes to stderr so that command output on stdout stays parseable.
//! Call `logger::init(...)` once at startup; without it the defaults apply
//! (errors, warnings and info, no debug tags).

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, update_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Install the logger configuration
pub fn init(config: LoggerConfig) {
    set_logger_config(config);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
///
/// Shown unless the minimum level was lowered to errors only.
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when debug mode is enabled for `tag`.
///
/// # Example
/// ```rust
/// use royale_client::logger::{self, LogTag, LoggerConfig};
///
/// logger::init(LoggerConfig::default().with_debug_tags(["cache"]));
/// logger::debug(LogTag::Cache, "shown");
/// logger::debug(LogTag::Api, "filtered out");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (raw payloads, per-request detail)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
