//! Quote Aggregator Configuration
//!
//! Configuration management and startup utilities for the quote aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, CONFIG_PATH_ENV};
pub use settings::{
	ConfigValidationError, DatabaseSettings, LogFormat, LoggingSettings, ServerSettings, Settings,
	TimeoutSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
