//! In-memory providers using DashMap

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use qa_types::{EquipmentRow, LineItem, QuoteRevision};
use tracing::debug;

use crate::traits::{ErpStorage, QuoteStorage, StorageResult};

/// In-memory store implementing both the ERP and quote providers
///
/// Records are keyed by trimmed service-call id. Equipment and line items
/// keep insertion order; revisions are kept sorted by revision number.
#[derive(Clone, Default)]
pub struct MemoryStore {
	pub equipment: Arc<DashMap<String, Vec<EquipmentRow>>>,
	pub revisions: Arc<DashMap<String, Vec<QuoteRevision>>>,
	pub line_items: Arc<DashMap<String, Vec<LineItem>>>,
}

impl MemoryStore {
	/// Create a new empty memory store
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an ERP equipment row
	pub fn add_equipment(&self, row: EquipmentRow) {
		let key = row.service_call_id.trim().to_string();
		self.equipment.entry(key).or_default().push(row);
	}

	/// Insert or replace a quote revision
	pub fn add_revision(&self, revision: QuoteRevision) {
		let key = revision.service_call_id.trim().to_string();
		let mut revisions = self.revisions.entry(key).or_default();
		revisions.retain(|existing| existing.revision != revision.revision);
		revisions.push(revision);
		revisions.sort_by_key(|r| r.revision);
	}

	/// Append a line item to its revision
	pub fn add_line_item(&self, item: LineItem) {
		let key = item.service_call_id.trim().to_string();
		self.line_items.entry(key).or_default().push(item);
	}

	fn lookup<T: Clone>(map: &DashMap<String, Vec<T>>, service_call_id: &str) -> Vec<T> {
		map.get(service_call_id.trim())
			.map(|entry| entry.value().clone())
			.unwrap_or_default()
	}
}

#[async_trait]
impl ErpStorage for MemoryStore {
	async fn equipment_for_call(&self, service_call_id: &str) -> StorageResult<Vec<EquipmentRow>> {
		let rows = Self::lookup(&self.equipment, service_call_id);
		debug!("Memory ERP returned {} equipment row(s)", rows.len());
		Ok(rows)
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}
}

#[async_trait]
impl QuoteStorage for MemoryStore {
	async fn revisions_for_call(&self, service_call_id: &str) -> StorageResult<Vec<QuoteRevision>> {
		Ok(Self::lookup(&self.revisions, service_call_id))
	}

	async fn line_items_for_call(&self, service_call_id: &str) -> StorageResult<Vec<LineItem>> {
		Ok(Self::lookup(&self.line_items, service_call_id))
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}
}
