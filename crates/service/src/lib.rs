//! Quote Aggregator Service
//!
//! Core logic for turning ERP equipment rows and local quote revisions into
//! one consolidated service-call view.

pub mod aggregator;
pub mod assembler;
pub mod consolidation;

pub use aggregator::{AggregatorService, ServiceCallAggregatorTrait, SourceHealth};
pub use assembler::assemble;
pub use consolidation::{classify_units, consolidate, customer_from_erp, customer_from_quote};
