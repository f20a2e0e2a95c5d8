use super::schemas::Config;
/// Configuration loading helpers
///
/// Configuration is a plain value handed to `RoyaleClient::new`; there is no
/// process-wide instance, so several differently configured clients can live
/// side by side.
use crate::errors::{ClientError, ClientResult};
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "royale.toml";

/// Load configuration from a TOML file
///
/// A missing file is not an error: defaults are used and a warning is logged.
/// The loaded client section is validated before it is returned.
pub fn load_config_from_path(path: impl AsRef<Path>) -> ClientResult<Config> {
    let path = path.as_ref();

    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::configuration_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Config::from_toml_str(&contents)?;
        logger::debug(
            LogTag::Config,
            &format!("Loaded configuration from {}", path.display()),
        );
        config
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    config.client.validate()?;
    Ok(config)
}

pub fn load_config() -> ClientResult<Config> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Write a configuration to disk as pretty TOML
pub fn save_config(config: &Config, path: impl AsRef<Path>) -> ClientResult<()> {
    let path = path.as_ref();
    let contents = config.to_toml_string()?;
    std::fs::write(path, contents).map_err(|e| {
        ClientError::configuration_error(format!(
            "Failed to write config file '{}': {}",
            path.display(),
            e
        ))
    })
}
