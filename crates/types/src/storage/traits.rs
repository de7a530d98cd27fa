//! Provider traits for the two data sources

use crate::{EquipmentRow, LineItem, QuoteRevision};
use async_trait::async_trait;

use super::StorageResult;

/// Read-only view of the external ERP
#[async_trait]
pub trait ErpStorageTrait: Send + Sync {
	/// Equipment-per-call rows for a service call, in join order.
	/// An unknown id yields an empty vector, not an error.
	async fn equipment_for_call(&self, service_call_id: &str) -> StorageResult<Vec<EquipmentRow>>;

	/// Health check for the ERP source
	async fn health_check(&self) -> StorageResult<bool>;
}

/// Read-only view of the local quote store
#[async_trait]
pub trait QuoteStorageTrait: Send + Sync {
	/// Revisions saved for a service call, ascending by revision number
	async fn revisions_for_call(&self, service_call_id: &str) -> StorageResult<Vec<QuoteRevision>>;

	/// Line items across every revision of a service call
	async fn line_items_for_call(&self, service_call_id: &str) -> StorageResult<Vec<LineItem>>;

	/// Health check for the quote store
	async fn health_check(&self) -> StorageResult<bool>;
}
