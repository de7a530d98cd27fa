//! Service-call aggregation
//!
//! Reads both sources, reconciles them into one base-data snapshot and joins
//! the quote revisions with their line items.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use qa_storage::{ErpStorage, QuoteStorage};
use qa_types::{
	AggregatedResult, Clock, ServiceCallError, ServiceCallResult, StorageError, StorageResult,
	SystemClock,
};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, warn};

use crate::assembler::assemble;
use crate::consolidation::consolidate;

const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5000;

/// Reachability of both data sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceHealth {
	pub erp: bool,
	pub quotes: bool,
}

impl SourceHealth {
	pub fn all_healthy(&self) -> bool {
		self.erp && self.quotes
	}
}

/// Trait for service-call aggregation (lets the API layer run against any implementation)
#[async_trait]
pub trait ServiceCallAggregatorTrait: Send + Sync {
	/// Aggregate everything known about a service call
	async fn aggregate(&self, service_call_id: &str) -> ServiceCallResult<AggregatedResult>;

	/// Probe both sources
	async fn health_check_all(&self) -> SourceHealth;
}

/// Aggregator over an ERP provider and a quote store provider
#[derive(Clone)]
pub struct AggregatorService {
	erp: Arc<dyn ErpStorage>,
	quotes: Arc<dyn QuoteStorage>,
	clock: Arc<dyn Clock>,
	query_timeout: Duration,
}

impl AggregatorService {
	pub fn new(erp: Arc<dyn ErpStorage>, quotes: Arc<dyn QuoteStorage>) -> Self {
		Self {
			erp,
			quotes,
			clock: Arc::new(SystemClock),
			query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
		}
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	/// Upper bound for each provider read
	pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
		self.query_timeout = query_timeout;
		self
	}

	async fn bounded<T, F>(&self, read: F) -> StorageResult<T>
	where
		F: Future<Output = StorageResult<T>>,
	{
		match timeout(self.query_timeout, read).await {
			Ok(result) => result,
			Err(_) => Err(StorageError::Timeout {
				timeout_ms: self.query_timeout.as_millis() as u64,
			}),
		}
	}

	async fn collect(&self, service_call_id: &str) -> ServiceCallResult<AggregatedResult> {
		let (equipment, revisions) = tokio::try_join!(
			self.bounded(self.erp.equipment_for_call(service_call_id)),
			self.bounded(self.quotes.revisions_for_call(service_call_id)),
		)?;

		if equipment.is_empty() && revisions.is_empty() {
			return Err(ServiceCallError::NotFound {
				service_call_id: service_call_id.to_string(),
			});
		}

		debug!(
			"Service call {}: {} equipment row(s), {} revision(s)",
			service_call_id,
			equipment.len(),
			revisions.len()
		);

		let base_data = Arc::new(consolidate(
			&equipment,
			revisions.first(),
			self.clock.now(),
		));

		let revisions = if revisions.is_empty() {
			Vec::new()
		} else {
			let line_items = self
				.bounded(self.quotes.line_items_for_call(service_call_id))
				.await?;
			assemble(&revisions, &line_items, &base_data)
		};

		Ok(AggregatedResult {
			revisions,
			base_data,
		})
	}
}

#[async_trait]
impl ServiceCallAggregatorTrait for AggregatorService {
	async fn aggregate(&self, service_call_id: &str) -> ServiceCallResult<AggregatedResult> {
		let service_call_id = service_call_id.trim();
		if service_call_id.is_empty() {
			return Err(ServiceCallError::NotFound {
				service_call_id: String::new(),
			});
		}

		match self.collect(service_call_id).await {
			Ok(result) => {
				info!(
					"Aggregated service call {} with {} revision(s)",
					service_call_id,
					result.revisions.len()
				);
				Ok(result)
			},
			Err(ServiceCallError::NotFound { service_call_id }) => {
				warn!("Service call {} not found in either source", service_call_id);
				Err(ServiceCallError::NotFound { service_call_id })
			},
			Err(e) => {
				error!("Failed to aggregate service call {}: {}", service_call_id, e);
				Err(e)
			},
		}
	}

	async fn health_check_all(&self) -> SourceHealth {
		let (erp, quotes) = tokio::join!(
			self.bounded(self.erp.health_check()),
			self.bounded(self.quotes.health_check()),
		);

		let health = SourceHealth {
			erp: erp.unwrap_or_else(|e| {
				warn!("ERP health check failed: {}", e);
				false
			}),
			quotes: quotes.unwrap_or_else(|e| {
				warn!("Quote store health check failed: {}", e);
				false
			}),
		};
		debug!("Source health: {:?}", health);
		health
	}
}
