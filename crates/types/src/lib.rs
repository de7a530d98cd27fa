//! Quote Aggregator Types
//!
//! Shared models and traits for the service-call quote aggregator.
//! Models are organized by the source they come from: ERP equipment,
//! local quotes, and the consolidated service-call view built from both.

pub mod clock;
pub mod equipment;
pub mod quotes;
pub mod service_calls;
pub mod storage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use clock::{Clock, FixedClock, SystemClock};

pub use equipment::{classify, parse_erp_datetime, EquipmentRow, UnitKind, WarrantyStatus};

pub use quotes::{LineItem, PartView, QuoteRevision, Rates};

pub use service_calls::{
	AggregatedResult, AtsUnit, BaseData, Customer, GeneratorUnit, RevisionView, ServiceCallError,
	ServiceCallResult, UnitInfo,
};

pub use storage::{ErpStorageTrait, QuoteStorageTrait, StorageError, StorageResult};
