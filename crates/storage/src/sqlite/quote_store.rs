//! Local quote adapter

use async_trait::async_trait;
use qa_types::{LineItem, QuoteRevision, StorageError};
use rusqlite::Row;
use tracing::debug;

use super::{query_error, SqliteSource};
use crate::traits::{QuoteStorage, StorageResult};

const REVISIONS_FOR_CALL_SQL: &str = "
	SELECT service_call_id, revision, customer_name, tech_rate, travel_rate
	FROM quote
	WHERE TRIM(service_call_id) = ?1
	ORDER BY revision ASC
";

const LINE_ITEMS_FOR_CALL_SQL: &str = "
	SELECT quote_service_call_id, quote_revision, part_number, description, vendor,
		on_hand, quantity, unit_cost
	FROM quote_line_item
	WHERE TRIM(quote_service_call_id) = ?1
	ORDER BY quote_revision ASC, rowid ASC
";

/// Quote store provider backed by the local SQLite database
#[derive(Debug, Clone)]
pub struct QuoteSqliteStore {
	source: SqliteSource,
}

impl QuoteSqliteStore {
	pub fn new(source: SqliteSource) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &SqliteSource {
		&self.source
	}
}

#[async_trait]
impl QuoteStorage for QuoteSqliteStore {
	async fn revisions_for_call(&self, service_call_id: &str) -> StorageResult<Vec<QuoteRevision>> {
		let service_call_id = service_call_id.trim().to_string();
		let revisions = self
			.source
			.with_connection(move |conn| {
				let mut stmt = conn.prepare(REVISIONS_FOR_CALL_SQL).map_err(query_error)?;
				let raw = stmt
					.query_map([&service_call_id], |row| {
						Ok((
							row.get::<_, String>(0)?,
							row.get::<_, i64>(1)?,
							row.get::<_, Option<String>>(2)?,
							row.get::<_, f64>(3)?,
							row.get::<_, f64>(4)?,
						))
					})
					.map_err(query_error)?
					.collect::<Result<Vec<_>, _>>()
					.map_err(query_error)?;

				raw.into_iter()
					.map(|(call_id, revision, customer_name, tech_rate, travel_rate)| {
						Ok(QuoteRevision {
							service_call_id: call_id.trim().to_string(),
							revision: revision_number(revision)?,
							customer_name,
							tech_rate,
							travel_rate,
						})
					})
					.collect::<StorageResult<Vec<_>>>()
			})
			.await?;

		debug!("Quote store returned {} revision(s)", revisions.len());
		Ok(revisions)
	}

	async fn line_items_for_call(&self, service_call_id: &str) -> StorageResult<Vec<LineItem>> {
		let service_call_id = service_call_id.trim().to_string();
		let items = self
			.source
			.with_connection(move |conn| {
				let mut stmt = conn.prepare(LINE_ITEMS_FOR_CALL_SQL).map_err(query_error)?;
				let raw = stmt
					.query_map([&service_call_id], map_line_item)
					.map_err(query_error)?
					.collect::<Result<Vec<_>, _>>()
					.map_err(query_error)?;

				raw.into_iter()
					.map(|(revision, mut item)| {
						item.revision = revision_number(revision)?;
						Ok(item)
					})
					.collect::<StorageResult<Vec<_>>>()
			})
			.await?;

		debug!("Quote store returned {} line item(s)", items.len());
		Ok(items)
	}

	async fn health_check(&self) -> StorageResult<bool> {
		self.source.ping().await
	}
}

/// Map a line item row, returning the raw revision alongside it for validation
fn map_line_item(row: &Row<'_>) -> rusqlite::Result<(i64, LineItem)> {
	let revision: i64 = row.get(1)?;
	Ok((
		revision,
		LineItem {
			service_call_id: row.get::<_, String>(0)?.trim().to_string(),
			revision: 0,
			part_number: row.get(2)?,
			description: row.get(3)?,
			vendor: row.get(4)?,
			on_hand: row.get(5)?,
			quantity: row.get(6)?,
			unit_cost: row.get(7)?,
		},
	))
}

/// Revision numbers are positive
fn revision_number(raw: i64) -> StorageResult<u32> {
	u32::try_from(raw)
		.ok()
		.filter(|revision| *revision > 0)
		.ok_or_else(|| StorageError::malformed(format!("invalid revision number {}", raw)))
}
