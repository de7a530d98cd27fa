//! Quote Aggregator Library
//!
//! Serves one consolidated view of a service call: the ERP's customer and
//! equipment records reconciled with every locally saved quote revision.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

// Core domain types
pub use qa_types::{
	chrono,
	serde_json,
	AggregatedResult,
	BaseData,
	Clock,
	Customer,
	EquipmentRow,
	FixedClock,
	LineItem,
	QuoteRevision,
	RevisionView,
	// Error types
	ServiceCallError,
	StorageError,
	SystemClock,
	UnitInfo,
	UnitKind,
	WarrantyStatus,
};

// Service layer
pub use qa_service::{AggregatorService, ServiceCallAggregatorTrait, SourceHealth};

// Storage layer
pub use qa_storage::{
	bootstrap_quote_schema, AccessMode, ErpSqliteStore, ErpStorage, MemoryStore, QuoteSqliteStore,
	QuoteStorage, SqliteSource,
};

// API layer
pub use qa_api::{create_router, AppState};

// Config
pub use qa_config::{
	load_config, log_service_info, log_service_shutdown, log_startup_complete, LogFormat,
	Settings,
};

// Module aliases
pub mod models {
	pub use qa_types::*;
}

pub mod storage {
	pub use qa_storage::*;
}

pub mod config {
	pub use qa_config::*;
}

pub mod service {
	pub use qa_service::*;
}

pub mod api {
	pub use qa_api::*;
}

pub mod mocks;

/// Builder pattern for configuring the aggregator
///
/// Providers left unset are opened from `settings.database` as read-only
/// SQLite sources.
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	erp: Option<Arc<dyn ErpStorage>>,
	quotes: Option<Arc<dyn QuoteStorage>>,
	clock: Option<Arc<dyn Clock>>,
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	pub fn with_erp<E>(mut self, erp: E) -> Self
	where
		E: ErpStorage + 'static,
	{
		self.erp = Some(Arc::new(erp));
		self
	}

	pub fn with_quotes<Q>(mut self, quotes: Q) -> Self
	where
		Q: QuoteStorage + 'static,
	{
		self.quotes = Some(Arc::new(quotes));
		self
	}

	/// Use one store for both sources
	pub fn with_storage<S>(self, storage: S) -> Self
	where
		S: ErpStorage + QuoteStorage + Clone + 'static,
	{
		self.with_erp(storage.clone()).with_quotes(storage)
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = Some(clock);
		self
	}

	fn init_tracing_from_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};
		result.map_err(|e| format!("Failed to initialize logging: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Read-only source for a configured database path
	fn sqlite_source(
		settings: &Settings,
		path: &qa_config::ConfigurableValue,
	) -> Result<SqliteSource, Box<dyn Error>> {
		let resolved = path.resolve().map_err(|e| {
			format!(
				"Failed to resolve database path ({}): {}",
				path.description(),
				e
			)
		})?;

		Ok(SqliteSource::read_only(resolved)
			.with_busy_timeout(Duration::from_millis(settings.database.busy_timeout_ms))
			.with_query_timeout(Duration::from_millis(settings.timeouts.query_ms)))
	}

	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		settings.validate()?;

		let erp = match self.erp {
			Some(erp) => erp,
			None => {
				let source = Self::sqlite_source(&settings, &settings.database.erp_path)?;
				info!("ERP source: {}", source.path().display());
				Arc::new(ErpSqliteStore::new(source)) as Arc<dyn ErpStorage>
			},
		};

		let quotes = match self.quotes {
			Some(quotes) => quotes,
			None => {
				let source = Self::sqlite_source(&settings, &settings.database.quote_path)?;
				info!("Quote store: {}", source.path().display());
				if settings.database.bootstrap_schema {
					bootstrap_quote_schema(&source)
						.await
						.map_err(|e| format!("Failed to bootstrap quote schema: {}", e))?;
				}
				Arc::new(QuoteSqliteStore::new(source)) as Arc<dyn QuoteStorage>
			},
		};

		let mut aggregator_service = AggregatorService::new(erp, quotes)
			.with_query_timeout(Duration::from_millis(settings.timeouts.query_ms));
		if let Some(clock) = self.clock {
			aggregator_service = aggregator_service.with_clock(clock);
		}

		let app_state = AppState::new(
			Arc::new(aggregator_service) as Arc<dyn ServiceCallAggregatorTrait>
		);
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	pub async fn start_server(mut self) -> Result<(), Box<dyn Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};

		self.init_tracing_from_settings(&settings)?;

		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  GET  /service-call/{{id}}");
		info!("  GET  /api/service-call/{{id}}");

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
