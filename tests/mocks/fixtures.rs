//! SQLite fixtures laid out like the ERP replica and the local quote store

use std::path::PathBuf;

use quote_aggregator::config::{ConfigurableValue, Settings};
use quote_aggregator::storage::sqlite::schema::QUOTE_SCHEMA;
use rusqlite::Connection;
use tempfile::TempDir;

pub const ERP_SCHEMA: &str = "
	CREATE TABLE sv00300 (Service_Call_ID TEXT, CUSTNMBR TEXT);
	CREATE TABLE rm00101 (CUSTNMBR TEXT, CUSTNAME TEXT, CNTCPRSN TEXT);
	CREATE TABLE sv00302 (Service_Call_ID TEXT, Equipment_ID TEXT);
	CREATE TABLE sv00400 (
		Equipment_ID TEXT,
		Wennsoft_Model_Number TEXT,
		Wennsoft_Serial_Number TEXT,
		Equipment_Type TEXT,
		Warranty_Expiration TEXT
	);
";

/// SC-1: a standby generator under warranty until 2030 and an ATS panel
pub const SC1_ERP: &str = "
	INSERT INTO rm00101 VALUES ('C001', 'Acme Corp', 'Pat Smith');
	INSERT INTO sv00300 VALUES ('SC-1', 'C001');
	INSERT INTO sv00302 VALUES ('SC-1', 'EQ-1');
	INSERT INTO sv00302 VALUES ('SC-1', 'EQ-2');
	INSERT INTO sv00400 VALUES ('EQ-1', 'GX-150', 'GEN-0001', 'Standby Generator', '2030-01-01 00:00:00');
	INSERT INTO sv00400 VALUES ('EQ-2', 'TS-400', 'ATS-0002', 'ATS Panel', NULL);
";

/// SC-1: revision 1 with two line items
pub const SC1_QUOTES: &str = "
	INSERT INTO quote (service_call_id, revision, customer_name, tech_rate, travel_rate)
		VALUES ('SC-1', 1, 'Acme Corp', 95.0, 75.0);
	INSERT INTO quote_line_item
		(quote_service_call_id, quote_revision, part_number, description, vendor, on_hand, quantity, unit_cost)
		VALUES ('SC-1', 1, 'FLT-100', 'Oil filter', 'Acme Parts', 4, 2, 12.5);
	INSERT INTO quote_line_item
		(quote_service_call_id, quote_revision, part_number, description, vendor, on_hand, quantity, unit_cost)
		VALUES ('SC-1', 1, 'BLT-220', 'Fan belt', 'Acme Parts', 1, 1, 48.0);
";

/// Two temp-dir databases plus settings pointing at them
pub struct SqliteFixture {
	_dir: TempDir,
	pub erp_path: PathBuf,
	pub quote_path: PathBuf,
}

impl SqliteFixture {
	/// ERP replica with its tables and a quote store with the quote schema
	pub fn new() -> Self {
		let fixture = Self::without_quote_store();
		Connection::open(&fixture.quote_path)
			.and_then(|conn| conn.execute_batch(QUOTE_SCHEMA))
			.expect("create quote store");
		fixture
	}

	/// ERP replica only; the quote store file does not exist yet
	pub fn without_quote_store() -> Self {
		let dir = tempfile::tempdir().expect("tempdir");
		let erp_path = dir.path().join("erp.db");
		let quote_path = dir.path().join("quotes.db");

		Connection::open(&erp_path)
			.and_then(|conn| conn.execute_batch(ERP_SCHEMA))
			.expect("create erp replica");

		Self {
			_dir: dir,
			erp_path,
			quote_path,
		}
	}

	/// The SC-1 scenario in both databases
	pub fn sc1() -> Self {
		Self::new().seed_erp(SC1_ERP).seed_quotes(SC1_QUOTES)
	}

	pub fn seed_erp(self, sql: &str) -> Self {
		Connection::open(&self.erp_path)
			.and_then(|conn| conn.execute_batch(sql))
			.expect("seed erp replica");
		self
	}

	pub fn seed_quotes(self, sql: &str) -> Self {
		Connection::open(&self.quote_path)
			.and_then(|conn| conn.execute_batch(sql))
			.expect("seed quote store");
		self
	}

	pub fn settings(&self) -> Settings {
		let mut settings = Settings::default();
		settings.database.erp_path =
			ConfigurableValue::from_plain(&self.erp_path.to_string_lossy());
		settings.database.quote_path =
			ConfigurableValue::from_plain(&self.quote_path.to_string_lossy());
		settings
	}
}
