//! Error types for service-call aggregation

use crate::storage::StorageError;
use thiserror::Error;

/// Outward-facing failures of a service-call aggregation
#[derive(Error, Debug)]
pub enum ServiceCallError {
	#[error("Service call not found: {service_call_id}")]
	NotFound { service_call_id: String },

	#[error("Data source error: {0}")]
	DataSource(#[from] StorageError),
}

pub type ServiceCallResult<T> = Result<T, ServiceCallError>;
