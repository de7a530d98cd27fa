//! Demo data and misbehaving providers for examples and testing
//!
//! Small, self-contained providers that can stand in for the SQLite sources
//! without any files on disk.

use std::time::Duration;

use async_trait::async_trait;
use qa_types::chrono::NaiveDate;
use qa_types::{EquipmentRow, LineItem, QuoteRevision, StorageError};

use crate::storage::{ErpStorage, MemoryStore, QuoteStorage, StorageResult};

/// Service call with ERP equipment and one saved revision
pub const DEMO_CALL_ID: &str = "SC-1";

/// Service call that only exists in the local quote store
pub const DEMO_QUOTE_ONLY_CALL_ID: &str = "SC-3";

/// Memory store seeded with the demo service calls
pub fn demo_store() -> MemoryStore {
	let store = MemoryStore::new();

	store.add_equipment(EquipmentRow {
		customer_number: Some("C-1001".to_string()),
		customer_name: Some("Acme Corp".to_string()),
		contact_name: Some("Pat Smith".to_string()),
		equipment_id: Some("EQ-1".to_string()),
		model: Some("GX-150".to_string()),
		serial: Some("GEN-0001".to_string()),
		equipment_type: Some("Standby Generator".to_string()),
		warranty_expiration: NaiveDate::from_ymd_opt(2030, 1, 1)
			.and_then(|date| date.and_hms_opt(0, 0, 0)),
		..EquipmentRow::new(DEMO_CALL_ID)
	});
	store.add_equipment(EquipmentRow {
		customer_number: Some("C-1001".to_string()),
		customer_name: Some("Acme Corp".to_string()),
		contact_name: Some("Pat Smith".to_string()),
		equipment_id: Some("EQ-2".to_string()),
		model: Some("TS-400".to_string()),
		serial: Some("ATS-0002".to_string()),
		equipment_type: Some("ATS Panel".to_string()),
		..EquipmentRow::new(DEMO_CALL_ID)
	});

	store.add_revision(QuoteRevision {
		service_call_id: DEMO_CALL_ID.to_string(),
		revision: 1,
		customer_name: Some("Acme Corp".to_string()),
		tech_rate: 95.0,
		travel_rate: 75.0,
	});
	store.add_line_item(demo_item(DEMO_CALL_ID, 1, "FLT-100", "Oil filter", 2.0, 12.5));
	store.add_line_item(demo_item(DEMO_CALL_ID, 1, "BLT-220", "Fan belt", 1.0, 48.0));

	store.add_revision(QuoteRevision {
		service_call_id: DEMO_QUOTE_ONLY_CALL_ID.to_string(),
		revision: 1,
		customer_name: Some("Walk-in Customer".to_string()),
		tech_rate: 110.0,
		travel_rate: 80.0,
	});
	store.add_line_item(demo_item(
		DEMO_QUOTE_ONLY_CALL_ID,
		1,
		"BAT-12",
		"Starting battery",
		1.0,
		140.0,
	));

	store
}

fn demo_item(
	service_call_id: &str,
	revision: u32,
	part_number: &str,
	description: &str,
	quantity: f64,
	unit_cost: f64,
) -> LineItem {
	LineItem {
		service_call_id: service_call_id.to_string(),
		revision,
		part_number: Some(part_number.to_string()),
		description: Some(description.to_string()),
		vendor: Some("Acme Parts".to_string()),
		on_hand: 3.0,
		quantity,
		unit_cost,
	}
}

/// Provider whose every read fails with a query error
#[derive(Debug, Clone)]
pub struct FailingStore {
	message: String,
}

impl FailingStore {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	fn error(&self) -> StorageError {
		StorageError::Query {
			message: self.message.clone(),
		}
	}
}

#[async_trait]
impl ErpStorage for FailingStore {
	async fn equipment_for_call(&self, _service_call_id: &str) -> StorageResult<Vec<EquipmentRow>> {
		Err(self.error())
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Err(self.error())
	}
}

#[async_trait]
impl QuoteStorage for FailingStore {
	async fn revisions_for_call(&self, _service_call_id: &str) -> StorageResult<Vec<QuoteRevision>> {
		Err(self.error())
	}

	async fn line_items_for_call(&self, _service_call_id: &str) -> StorageResult<Vec<LineItem>> {
		Err(self.error())
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Err(self.error())
	}
}

/// Provider that serves another provider's data after a fixed delay
#[derive(Clone)]
pub struct SlowStore {
	inner: MemoryStore,
	delay: Duration,
}

impl SlowStore {
	pub fn new(inner: MemoryStore, delay: Duration) -> Self {
		Self { inner, delay }
	}
}

#[async_trait]
impl ErpStorage for SlowStore {
	async fn equipment_for_call(&self, service_call_id: &str) -> StorageResult<Vec<EquipmentRow>> {
		tokio::time::sleep(self.delay).await;
		ErpStorage::equipment_for_call(&self.inner, service_call_id).await
	}

	async fn health_check(&self) -> StorageResult<bool> {
		tokio::time::sleep(self.delay).await;
		ErpStorage::health_check(&self.inner).await
	}
}

#[async_trait]
impl QuoteStorage for SlowStore {
	async fn revisions_for_call(&self, service_call_id: &str) -> StorageResult<Vec<QuoteRevision>> {
		tokio::time::sleep(self.delay).await;
		self.inner.revisions_for_call(service_call_id).await
	}

	async fn line_items_for_call(&self, service_call_id: &str) -> StorageResult<Vec<LineItem>> {
		tokio::time::sleep(self.delay).await;
		self.inner.line_items_for_call(service_call_id).await
	}

	async fn health_check(&self) -> StorageResult<bool> {
		tokio::time::sleep(self.delay).await;
		QuoteStorage::health_check(&self.inner).await
	}
}
