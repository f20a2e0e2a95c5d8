/// Log tags, one per subsystem of the client

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    Api,
    Cache,
    RateLimit,
    Client,
    Config,
    System,
    Other(String),
}

impl LogTag {
    /// Lowercase key used by debug flags (`--debug cache`)
    pub fn to_debug_key(&self) -> &str {
        match self {
            LogTag::Api => "api",
            LogTag::Cache => "cache",
            LogTag::RateLimit => "ratelimit",
            LogTag::Client => "client",
            LogTag::Config => "config",
            LogTag::System => "system",
            LogTag::Other(name) => name.as_str(),
        }
    }

    /// Uppercase label printed in the tag column
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::RateLimit => "RATELIMIT".to_string(),
            other => other.to_debug_key().to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
