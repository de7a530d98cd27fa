//! Consolidation of ERP rows into the shared base data
//!
//! Pure functions only; the current instant is passed in so warranty status
//! can be evaluated deterministically.

use qa_types::chrono::{DateTime, Utc};
use qa_types::{
	AtsUnit, BaseData, Customer, EquipmentRow, GeneratorUnit, QuoteRevision, UnitInfo, UnitKind,
	WarrantyStatus,
};

/// Build the base data for a service call
///
/// ERP rows win when present. Without them the customer comes from the
/// fallback quote revision and no units are reported.
pub fn consolidate(
	rows: &[EquipmentRow],
	fallback: Option<&QuoteRevision>,
	now: DateTime<Utc>,
) -> BaseData {
	match rows.first() {
		Some(first) => BaseData {
			customer: customer_from_erp(first),
			unit_info: classify_units(rows, now),
		},
		None => BaseData {
			customer: fallback.map(customer_from_quote).unwrap_or_default(),
			unit_info: UnitInfo::default(),
		},
	}
}

/// Customer from an ERP row: contact person first, then the company name
pub fn customer_from_erp(row: &EquipmentRow) -> Customer {
	let contact = row
		.contact_name
		.as_ref()
		.filter(|name| !name.trim().is_empty())
		.cloned();
	Customer {
		name: contact.or_else(|| row.customer_name.clone()),
		company: row.customer_name.clone(),
	}
}

/// Customer from the name stored on a quote revision
pub fn customer_from_quote(revision: &QuoteRevision) -> Customer {
	Customer {
		name: revision.customer_name.clone(),
		company: revision.customer_name.clone(),
	}
}

/// Classify every row into at most one generator and one ATS
///
/// Later rows of the same kind overwrite earlier ones.
pub fn classify_units(rows: &[EquipmentRow], now: DateTime<Utc>) -> UnitInfo {
	let mut unit_info = UnitInfo::default();
	for row in rows {
		match row.kind() {
			Some(UnitKind::Generator) => {
				unit_info.generator = Some(GeneratorUnit {
					model: row.model.clone(),
					serial: row.serial.clone(),
					warranty: WarrantyStatus::evaluate(row.warranty_expiration, now),
				});
			},
			Some(UnitKind::Ats) => {
				unit_info.ats = Some(AtsUnit {
					model: row.model.clone(),
					serial: row.serial.clone(),
				});
			},
			None => {},
		}
	}
	unit_info
}
