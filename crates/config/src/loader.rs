//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

const DEFAULT_CONFIG_FILE: &str = "config/config";

/// Load configuration from the config file, then `QUOTE_AGGREGATOR__*` overrides
///
/// The file is optional; every section falls back to its defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
	let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

	let s = Config::builder()
		.add_source(File::with_name(&path).required(false))
		.add_source(Environment::with_prefix("QUOTE_AGGREGATOR").separator("__"))
		.build()?;

	s.try_deserialize()
}
