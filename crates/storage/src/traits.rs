//! Storage traits for pluggable providers

// Re-export the storage traits from types crate
pub use qa_types::storage::{
	ErpStorageTrait as ErpStorage, QuoteStorageTrait as QuoteStorage, StorageError, StorageResult,
};
