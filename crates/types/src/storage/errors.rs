//! Error types for storage operations

use thiserror::Error;

/// Storage error type
///
/// Every variant is a data-source failure from the aggregation's point of
/// view; the variants only exist to keep the logged cause precise.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("Connection error: {message}")]
	Connection { message: String },
	#[error("Query failed: {message}")]
	Query { message: String },
	#[error("Malformed row: {message}")]
	MalformedRow { message: String },
	#[error("Storage read timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },
	#[error("Storage task failed: {message}")]
	Task { message: String },
}

impl StorageError {
	pub fn malformed(message: impl Into<String>) -> Self {
		StorageError::MalformedRow {
			message: message.into(),
		}
	}
}
