//! Consolidated service-call view
//!
//! These are the shapes returned to the quote sheet: a single [`BaseData`]
//! snapshot (customer plus classified units) and the list of revisions that
//! all share it.

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::quotes::{PartView, Rates};
use crate::{UnitKind, WarrantyStatus};

pub mod errors;
pub use errors::*;

/// Customer identity shown on the quote
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Customer {
	/// Display name (contact person when known)
	pub name: Option<String>,
	/// Company name
	pub company: Option<String>,
}

/// Classified generator unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorUnit {
	pub model: Option<String>,
	pub serial: Option<String>,
	pub warranty: WarrantyStatus,
}

/// Classified automatic transfer switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtsUnit {
	pub model: Option<String>,
	pub serial: Option<String>,
}

/// At most one unit per kind
///
/// Serialized flat, keyed by `<kind>.<field>`, with keys only for the kinds
/// that are present:
/// `{"generator.model": .., "generator.serial": .., "generator.warranty": .., "ats.model": .., "ats.serial": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitInfo {
	pub generator: Option<GeneratorUnit>,
	pub ats: Option<AtsUnit>,
}

impl UnitInfo {
	/// Number of flattened entries
	pub fn len(&self) -> usize {
		self.generator.as_ref().map_or(0, |_| 3) + self.ats.as_ref().map_or(0, |_| 2)
	}

	pub fn is_empty(&self) -> bool {
		self.generator.is_none() && self.ats.is_none()
	}
}

impl Serialize for UnitInfo {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let key = |kind: UnitKind, field: &str| format!("{}.{}", kind.prefix(), field);

		let mut map = serializer.serialize_map(Some(self.len()))?;
		if let Some(generator) = &self.generator {
			map.serialize_entry(&key(UnitKind::Generator, "model"), &generator.model)?;
			map.serialize_entry(&key(UnitKind::Generator, "serial"), &generator.serial)?;
			map.serialize_entry(&key(UnitKind::Generator, "warranty"), &generator.warranty)?;
		}
		if let Some(ats) = &self.ats {
			map.serialize_entry(&key(UnitKind::Ats, "model"), &ats.model)?;
			map.serialize_entry(&key(UnitKind::Ats, "serial"), &ats.serial)?;
		}
		map.end()
	}
}

/// Customer and unit context shared by every revision of one response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseData {
	pub customer: Customer,
	pub unit_info: UnitInfo,
}

/// One revision as returned to the client
///
/// `base` points at the response-wide snapshot; it is flattened so the
/// revision carries `customer` and `unitInfo` at its top level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionView {
	pub revision: u32,
	#[serde(flatten)]
	pub base: Arc<BaseData>,
	pub rates: Rates,
	pub parts: Vec<PartView>,
}

/// Full service-call response payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
	pub revisions: Vec<RevisionView>,
	pub base_data: Arc<BaseData>,
}
