//! Local quote revisions and their line items

use serde::{Deserialize, Serialize};

/// One saved revision of a quote for a service call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRevision {
	pub service_call_id: String,
	/// Revision number, unique per service call and starting at 1
	pub revision: u32,
	/// Customer name captured when the revision was saved
	pub customer_name: Option<String>,
	pub tech_rate: f64,
	pub travel_rate: f64,
}

impl QuoteRevision {
	pub fn rates(&self) -> Rates {
		Rates {
			tech: self.tech_rate,
			travel: self.travel_rate,
		}
	}
}

/// A part line on a quote revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
	pub service_call_id: String,
	/// Owning revision number
	pub revision: u32,
	pub part_number: Option<String>,
	pub description: Option<String>,
	pub vendor: Option<String>,
	pub on_hand: f64,
	pub quantity: f64,
	pub unit_cost: f64,
}

/// Labor rates of a revision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
	pub tech: f64,
	pub travel: f64,
}

/// Public shape of a line item in the service-call response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartView {
	pub part: Option<String>,
	pub desc: Option<String>,
	pub vendor: Option<String>,
	pub on_hand: f64,
	pub qty: f64,
	pub unit_cost: f64,
}

impl From<&LineItem> for PartView {
	fn from(item: &LineItem) -> Self {
		Self {
			part: item.part_number.clone(),
			desc: item.description.clone(),
			vendor: item.vendor.clone(),
			on_hand: item.on_hand,
			qty: item.quantity,
			unit_cost: item.unit_cost,
		}
	}
}
