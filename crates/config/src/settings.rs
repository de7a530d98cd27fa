//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub database: DatabaseSettings,
	pub timeouts: TimeoutSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Locations of the two data sources
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseSettings {
	/// SQLite file holding the ERP tables (opened read-only)
	pub erp_path: ConfigurableValue,
	/// SQLite file holding the local quote tables
	pub quote_path: ConfigurableValue,
	/// Create the local quote tables at startup when they are missing
	pub bootstrap_schema: bool,
	/// How long SQLite waits on a locked database before failing the read
	pub busy_timeout_ms: u64,
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Upper bound for a single storage read in milliseconds
	pub query_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings that cannot be used to start the service
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("server.port must be greater than zero")]
	InvalidPort,
	#[error("timeouts.query_ms must be greater than zero")]
	InvalidQueryTimeout,
	#[error("logging.level must not be empty")]
	EmptyLogLevel,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

impl Default for DatabaseSettings {
	fn default() -> Self {
		Self {
			erp_path: ConfigurableValue::from_plain("./database.db"),
			quote_path: ConfigurableValue::from_plain("./database.db"),
			bootstrap_schema: true,
			busy_timeout_ms: 2000,
		}
	}
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self { query_ms: 5000 }
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Reject settings the server cannot run with
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.port == 0 {
			return Err(ConfigValidationError::InvalidPort);
		}
		if self.timeouts.query_ms == 0 {
			return Err(ConfigValidationError::InvalidQueryTimeout);
		}
		if self.logging.level.trim().is_empty() {
			return Err(ConfigValidationError::EmptyLogLevel);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = Settings::default();
		assert_eq!(settings.bind_address(), "0.0.0.0:3000");
		assert_eq!(settings.timeouts.query_ms, 5000);
		assert!(settings.database.bootstrap_schema);
		assert_eq!(settings.logging.format, LogFormat::Pretty);
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_partial_config_falls_back_to_defaults() {
		let json = r#"{
			"server": { "port": 8080 },
			"database": { "erp_path": { "type": "env", "value": "ERP_DB_PATH" } }
		}"#;
		let settings: Settings = serde_json::from_str(json).unwrap();

		assert_eq!(settings.bind_address(), "0.0.0.0:8080");
		assert_eq!(
			settings.database.erp_path,
			ConfigurableValue::from_env("ERP_DB_PATH")
		);
		assert_eq!(
			settings.database.quote_path,
			ConfigurableValue::from_plain("./database.db")
		);
		assert_eq!(settings.logging.level, "info");
	}

	#[test]
	fn test_validate_rejects_zero_values() {
		let mut settings = Settings::default();
		settings.server.port = 0;
		assert_eq!(settings.validate(), Err(ConfigValidationError::InvalidPort));

		let mut settings = Settings::default();
		settings.timeouts.query_ms = 0;
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::InvalidQueryTimeout)
		);

		let mut settings = Settings::default();
		settings.logging.level = " ".to_string();
		assert_eq!(settings.validate(), Err(ConfigValidationError::EmptyLogLevel));
	}

	#[test]
	fn test_log_format_lowercase() {
		let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
		assert_eq!(format, LogFormat::Json);
	}
}
