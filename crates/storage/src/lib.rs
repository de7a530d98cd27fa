//! Quote Aggregator Storage
//!
//! Read providers for the two data sources behind a service call: the ERP
//! tables and the local quote tables. Both have a SQLite implementation and
//! share an in-memory implementation for demos and tests.

pub mod memory_store;
pub mod sqlite;
pub mod traits;

pub use memory_store::MemoryStore;
pub use sqlite::{
	bootstrap_quote_schema, AccessMode, ErpSqliteStore, QuoteSqliteStore, SqliteSource,
};
pub use traits::{ErpStorage, QuoteStorage, StorageError, StorageResult};
