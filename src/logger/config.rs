/// Logger configuration and the process-wide instance it lives in
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped (Error < Warning < Info < Debug < Verbose)
    pub min_level: LogLevel,

    /// Tags (by debug key) whose DEBUG messages are shown
    pub debug_tags: HashSet<String>,

    /// Tags whose VERBOSE messages are shown without global verbose mode
    pub verbose_tags: HashSet<String>,

    /// If non-empty, only these tags log below ERROR
    pub enabled_tags: HashSet<String>,

    /// Use ANSI colors on the console
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            colors: true,
        }
    }
}

impl LoggerConfig {
    pub fn with_debug_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.debug_tags
            .extend(tags.into_iter().map(|t| t.into().to_lowercase()));
        if self.min_level < LogLevel::Debug && !self.debug_tags.is_empty() {
            self.min_level = LogLevel::Debug;
        }
        self
    }

    pub fn verbose(mut self) -> Self {
        self.min_level = LogLevel::Verbose;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.min_level = LogLevel::Warning;
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.colors = false;
        self
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub fn update_logger_config<F>(f: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    f(&mut LOGGER_CONFIG.write());
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.min_level == LogLevel::Verbose || config.debug_tags.contains(tag.to_debug_key())
}

pub(super) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains(tag.to_debug_key())
}
