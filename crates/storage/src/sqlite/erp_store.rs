//! ERP equipment adapter over the replicated ERP tables
//!
//! Tables follow the ERP naming: `sv00300` (service calls), `rm00101`
//! (customers), `sv00302` (call to equipment link) and `sv00400` (equipment).

use async_trait::async_trait;
use qa_types::{parse_erp_datetime, EquipmentRow, StorageError};
use rusqlite::Row;
use tracing::debug;

use super::{query_error, SqliteSource};
use crate::traits::{ErpStorage, StorageResult};

const EQUIPMENT_FOR_CALL_SQL: &str = "
	SELECT
		sc.Service_Call_ID,
		sc.CUSTNMBR,
		cust.CUSTNAME,
		cust.CNTCPRSN,
		eq.Equipment_ID,
		eq.Wennsoft_Model_Number,
		eq.Wennsoft_Serial_Number,
		eq.Equipment_Type,
		eq.Warranty_Expiration
	FROM sv00300 sc
	LEFT JOIN rm00101 cust ON sc.CUSTNMBR = cust.CUSTNMBR
	LEFT JOIN sv00302 sceq ON sc.Service_Call_ID = sceq.Service_Call_ID
	LEFT JOIN sv00400 eq ON sceq.Equipment_ID = eq.Equipment_ID
	WHERE TRIM(sc.Service_Call_ID) = ?1
	ORDER BY sc.rowid, sceq.rowid
";

/// Raw column values before date parsing
struct RawEquipmentRow {
	row: EquipmentRow,
	warranty_expiration: Option<String>,
}

/// ERP query provider backed by a SQLite replica
#[derive(Debug, Clone)]
pub struct ErpSqliteStore {
	source: SqliteSource,
}

impl ErpSqliteStore {
	pub fn new(source: SqliteSource) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &SqliteSource {
		&self.source
	}
}

#[async_trait]
impl ErpStorage for ErpSqliteStore {
	async fn equipment_for_call(&self, service_call_id: &str) -> StorageResult<Vec<EquipmentRow>> {
		let service_call_id = service_call_id.trim().to_string();
		let rows = self
			.source
			.with_connection(move |conn| {
				let mut stmt = conn.prepare(EQUIPMENT_FOR_CALL_SQL).map_err(query_error)?;
				let raw_rows = stmt
					.query_map([&service_call_id], map_equipment_row)
					.map_err(query_error)?
					.collect::<Result<Vec<_>, _>>()
					.map_err(query_error)?;

				raw_rows
					.into_iter()
					.map(parse_warranty)
					.collect::<StorageResult<Vec<_>>>()
			})
			.await?;

		debug!("ERP returned {} equipment row(s)", rows.len());
		Ok(rows)
	}

	async fn health_check(&self) -> StorageResult<bool> {
		self.source.ping().await
	}
}

fn map_equipment_row(row: &Row<'_>) -> rusqlite::Result<RawEquipmentRow> {
	Ok(RawEquipmentRow {
		row: EquipmentRow {
			service_call_id: text(row, 0)?.unwrap_or_default(),
			customer_number: text(row, 1)?,
			customer_name: text(row, 2)?,
			contact_name: text(row, 3)?,
			equipment_id: text(row, 4)?,
			model: text(row, 5)?,
			serial: text(row, 6)?,
			equipment_type: text(row, 7)?,
			warranty_expiration: None,
		},
		warranty_expiration: text(row, 8)?,
	})
}

fn parse_warranty(raw: RawEquipmentRow) -> StorageResult<EquipmentRow> {
	let mut row = raw.row;
	if let Some(value) = raw.warranty_expiration {
		let parsed = parse_erp_datetime(&value).ok_or_else(|| {
			StorageError::malformed(format!(
				"unparseable Warranty_Expiration '{}' for equipment {:?}",
				value, row.equipment_id
			))
		})?;
		row.warranty_expiration = Some(parsed);
	}
	Ok(row)
}

/// ERP char columns are space padded; blank values count as absent
fn text(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
	let value: Option<String> = row.get(index)?;
	Ok(value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty()))
}
