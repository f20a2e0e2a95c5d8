/// Client configuration (TOML, serde defaults)
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{ClientConfig, Config, LoggingConfig, DEFAULT_BASE_URL};
pub use utils::{load_config, load_config_from_path, save_config, CONFIG_FILE_PATH};
