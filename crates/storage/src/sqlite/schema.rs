//! Local quote schema bootstrap

use tracing::info;

use super::{query_error, AccessMode, SqliteSource};
use crate::traits::StorageResult;

/// Tables owned by the quote sheet
pub const QUOTE_SCHEMA: &str = "
	CREATE TABLE IF NOT EXISTS quote (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		service_call_id TEXT NOT NULL,
		revision INTEGER NOT NULL,
		description TEXT,
		customer_name TEXT,
		status TEXT NOT NULL DEFAULT 'Draft',
		tech_count INTEGER NOT NULL DEFAULT 1,
		tech_hours REAL NOT NULL DEFAULT 0,
		travel_hours REAL NOT NULL DEFAULT 0,
		tech_rate REAL NOT NULL DEFAULT 0,
		travel_rate REAL NOT NULL DEFAULT 0,
		UNIQUE (service_call_id, revision)
	);

	CREATE TABLE IF NOT EXISTS quote_line_item (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		quote_service_call_id TEXT NOT NULL,
		quote_revision INTEGER NOT NULL,
		part_number TEXT,
		description TEXT,
		vendor TEXT,
		on_hand REAL NOT NULL DEFAULT 0,
		quantity REAL NOT NULL DEFAULT 0,
		unit_cost REAL NOT NULL DEFAULT 0,
		total_cost REAL NOT NULL DEFAULT 0,
		FOREIGN KEY (quote_service_call_id, quote_revision)
			REFERENCES quote (service_call_id, revision) ON DELETE CASCADE
	);

	CREATE INDEX IF NOT EXISTS idx_quote_line_item_call
		ON quote_line_item (quote_service_call_id, quote_revision);
";

/// Create the local quote tables when the `quote` table is missing
///
/// Returns whether the schema was created. Opens its own read-write
/// connection whatever the source's mode; runs once at startup, never on the
/// request path.
pub async fn bootstrap_quote_schema(source: &SqliteSource) -> StorageResult<bool> {
	let source = source.clone().with_mode(AccessMode::ReadWrite);
	let created = source
		.with_connection(|conn| {
			let exists: bool = conn
				.query_row(
					"SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'quote')",
					[],
					|row| row.get(0),
				)
				.map_err(query_error)?;
			if exists {
				return Ok(false);
			}
			conn.execute_batch(QUOTE_SCHEMA).map_err(query_error)?;
			Ok(true)
		})
		.await?;

	if created {
		info!(
			"Quote tables not found, initialized schema in {}",
			source.path().display()
		);
	}
	Ok(created)
}
