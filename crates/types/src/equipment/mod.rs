//! ERP equipment records and their classification
//!
//! The ERP join yields one row per equipment item linked to a service call.
//! Equipment types are free text, so each row is classified into a fixed
//! [`UnitKind`] by substring match before it contributes to the unit info.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One equipment-per-call row produced by the ERP join
///
/// Every column past the call id comes through a LEFT JOIN, so any of them
/// may be absent for a call without linked equipment or customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRow {
	pub service_call_id: String,
	pub customer_number: Option<String>,
	/// Company name from the customer master
	pub customer_name: Option<String>,
	/// Contact person on the customer record
	pub contact_name: Option<String>,
	pub equipment_id: Option<String>,
	pub model: Option<String>,
	pub serial: Option<String>,
	pub equipment_type: Option<String>,
	pub warranty_expiration: Option<NaiveDateTime>,
}

impl EquipmentRow {
	/// Create a row for a call with no customer or equipment columns populated
	pub fn new(service_call_id: impl Into<String>) -> Self {
		Self {
			service_call_id: service_call_id.into(),
			customer_number: None,
			customer_name: None,
			contact_name: None,
			equipment_id: None,
			model: None,
			serial: None,
			equipment_type: None,
			warranty_expiration: None,
		}
	}

	/// Classification of this row, if its equipment type is recognized
	pub fn kind(&self) -> Option<UnitKind> {
		self.equipment_type.as_deref().and_then(classify)
	}
}

/// Fixed equipment kinds the quote sheet knows how to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
	Generator,
	Ats,
}

impl UnitKind {
	/// Key prefix used in the flattened unit info map
	pub fn prefix(&self) -> &'static str {
		match self {
			UnitKind::Generator => "generator",
			UnitKind::Ats => "ats",
		}
	}
}

/// Classify a free-text equipment type
///
/// Matching is a case-insensitive substring test. "generator" is checked
/// first, so a type mentioning both kinds is a generator.
pub fn classify(equipment_type: &str) -> Option<UnitKind> {
	let normalized = equipment_type.to_lowercase();
	if normalized.contains("generator") {
		Some(UnitKind::Generator)
	} else if normalized.contains("ats") {
		Some(UnitKind::Ats)
	} else {
		None
	}
}

/// Derived warranty state of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarrantyStatus {
	Active,
	Expired,
}

impl WarrantyStatus {
	/// Active iff the expiration is strictly after `now`.
	/// A missing expiration is never after anything, so it reads as expired.
	pub fn evaluate(expiration: Option<NaiveDateTime>, now: DateTime<Utc>) -> Self {
		match expiration {
			Some(expires_at) if expires_at.and_utc() > now => WarrantyStatus::Active,
			_ => WarrantyStatus::Expired,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			WarrantyStatus::Active => "Active",
			WarrantyStatus::Expired => "Expired",
		}
	}
}

impl std::fmt::Display for WarrantyStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse an ERP date column
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, the ISO `T` separated form (fractional
/// seconds allowed on both) and a bare `YYYY-MM-DD`, which is taken as midnight.
/// All values are treated as UTC by the caller.
pub fn parse_erp_datetime(value: &str) -> Option<NaiveDateTime> {
	let value = value.trim();
	DATETIME_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
		.or_else(|| {
			NaiveDate::parse_from_str(value, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}
