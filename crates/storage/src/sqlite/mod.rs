//! SQLite-backed providers
//!
//! Every read goes through [`SqliteSource::with_connection`]: the connection
//! is opened on the blocking pool, used by a single closure and dropped when
//! that closure returns, whatever the outcome. Nothing holds a connection
//! between requests. A read whose caller gave up (timeout or a dropped
//! future) is interrupted, and its connection refuses further statements.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use qa_types::StorageError;
use rusqlite::{Connection, InterruptHandle, OpenFlags};
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::debug;

use crate::traits::StorageResult;

pub mod erp_store;
pub mod quote_store;
pub mod schema;

pub use erp_store::ErpSqliteStore;
pub use quote_store::QuoteSqliteStore;
pub use schema::bootstrap_quote_schema;

/// How connections to a source are opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
	ReadOnly,
	/// Read-write, creating the file when missing. Only used for schema bootstrap.
	ReadWrite,
}

impl AccessMode {
	fn flags(&self) -> OpenFlags {
		match self {
			AccessMode::ReadOnly => {
				OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
			},
			AccessMode::ReadWrite => {
				OpenFlags::SQLITE_OPEN_READ_WRITE
					| OpenFlags::SQLITE_OPEN_CREATE
					| OpenFlags::SQLITE_OPEN_NO_MUTEX
			},
		}
	}
}

/// A SQLite database file plus the limits applied to each access
#[derive(Debug, Clone)]
pub struct SqliteSource {
	path: PathBuf,
	mode: AccessMode,
	busy_timeout: Duration,
	query_timeout: Duration,
}

impl SqliteSource {
	pub fn new(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
		Self {
			path: path.into(),
			mode,
			busy_timeout: Duration::from_millis(2000),
			query_timeout: Duration::from_millis(5000),
		}
	}

	/// Read-only source, the normal mode for request handling
	pub fn read_only(path: impl Into<PathBuf>) -> Self {
		Self::new(path, AccessMode::ReadOnly)
	}

	pub fn with_mode(mut self, mode: AccessMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
		self.busy_timeout = busy_timeout;
		self
	}

	pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
		self.query_timeout = query_timeout;
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn mode(&self) -> AccessMode {
		self.mode
	}

	/// Run `f` against a freshly opened connection
	///
	/// The connection lives only inside the blocking task and is closed when
	/// `f` returns or fails. The whole acquisition, including the open, is
	/// bounded by the query timeout. If the timeout fires or the returned
	/// future is dropped first, the running statement is interrupted and
	/// every later statement on that connection fails.
	pub async fn with_connection<T, F>(&self, f: F) -> StorageResult<T>
	where
		T: Send + 'static,
		F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
	{
		let path = self.path.clone();
		let flags = self.mode.flags();
		let busy_timeout = self.busy_timeout;

		let cancelled = Arc::new(AtomicBool::new(false));
		let (handle_tx, handle_rx) = oneshot::channel::<InterruptHandle>();
		let mut guard = CancelOnDrop::new(Arc::clone(&cancelled), handle_rx);

		let task = tokio::task::spawn_blocking(move || {
			if cancelled.load(Ordering::Acquire) {
				return Err(StorageError::Task {
					message: "read cancelled before the connection was opened".to_string(),
				});
			}

			let conn = Connection::open_with_flags(&path, flags).map_err(|e| {
				StorageError::Connection {
					message: format!("{}: {}", path.display(), e),
				}
			})?;
			conn.busy_timeout(busy_timeout)
				.map_err(|e| StorageError::Connection {
					message: e.to_string(),
				})?;

			// Checked on every VM step so statements started after a cancel fail too.
			let stop = Arc::clone(&cancelled);
			conn.progress_handler(1, Some(move || stop.load(Ordering::Acquire)));
			// The receiver is gone only when the caller already left.
			let _ = handle_tx.send(conn.get_interrupt_handle());

			f(&conn)
		});

		let outcome = timeout(self.query_timeout, task).await;
		match outcome {
			Ok(Ok(result)) => {
				guard.disarm();
				result
			},
			Ok(Err(join_error)) => {
				guard.disarm();
				Err(StorageError::Task {
					message: join_error.to_string(),
				})
			},
			Err(_) => Err(StorageError::Timeout {
				timeout_ms: self.query_timeout.as_millis() as u64,
			}),
		}
	}

	/// Open a connection and run a trivial query
	pub async fn ping(&self) -> StorageResult<bool> {
		self.with_connection(|conn| {
			conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
				.map(|one| one == 1)
				.map_err(query_error)
		})
		.await
	}
}

/// Cancels a blocking read unless disarmed after it completed
struct CancelOnDrop {
	cancelled: Arc<AtomicBool>,
	handle: oneshot::Receiver<InterruptHandle>,
	armed: bool,
}

impl CancelOnDrop {
	fn new(cancelled: Arc<AtomicBool>, handle: oneshot::Receiver<InterruptHandle>) -> Self {
		Self {
			cancelled,
			handle,
			armed: true,
		}
	}

	fn disarm(&mut self) {
		self.armed = false;
	}
}

impl Drop for CancelOnDrop {
	fn drop(&mut self) {
		if !self.armed {
			return;
		}
		self.cancelled.store(true, Ordering::Release);
		if let Ok(handle) = self.handle.try_recv() {
			handle.interrupt();
		}
		debug!("Interrupted SQLite read abandoned by its caller");
	}
}

/// Map a rusqlite failure to the storage taxonomy
///
/// Type mismatches and NULLs in required columns are malformed data, not
/// query failures.
pub(crate) fn query_error(error: rusqlite::Error) -> StorageError {
	match error {
		rusqlite::Error::InvalidColumnType(index, name, found) => StorageError::MalformedRow {
			message: format!("column {} ({}) has unexpected type {}", index, name, found),
		},
		rusqlite::Error::FromSqlConversionFailure(index, found, cause) => {
			StorageError::MalformedRow {
				message: format!(
					"column {} could not be converted from {}: {}",
					index, found, cause
				),
			}
		},
		rusqlite::Error::IntegralValueOutOfRange(index, value) => StorageError::MalformedRow {
			message: format!("column {} value {} is out of range", index, value),
		},
		other => StorageError::Query {
			message: other.to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_database(path: &Path) {
		let conn = Connection::open(path).expect("create sqlite");
		conn.execute_batch("CREATE TABLE marker (id INTEGER)")
			.expect("seed sqlite");
	}

	#[tokio::test]
	async fn test_read_only_open_of_missing_file_is_connection_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let source = SqliteSource::read_only(dir.path().join("missing.db"));

		let result = source.ping().await;
		assert!(matches!(result, Err(StorageError::Connection { .. })));
	}

	#[tokio::test]
	async fn test_ping_existing_database() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("ok.db");
		create_database(&path);

		let source = SqliteSource::read_only(&path);
		assert!(source.ping().await.expect("ping"));
	}

	#[tokio::test]
	async fn test_closure_error_is_returned_unchanged() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("ok.db");
		create_database(&path);

		let source = SqliteSource::read_only(&path);
		let result: StorageResult<()> = source
			.with_connection(|_| Err(StorageError::malformed("bad row")))
			.await;
		assert!(matches!(result, Err(StorageError::MalformedRow { .. })));
	}

	#[tokio::test]
	async fn test_read_only_source_rejects_writes() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("ro.db");
		create_database(&path);

		let source = SqliteSource::read_only(&path);
		let result = source
			.with_connection(|conn| {
				conn.execute_batch("CREATE TABLE t(x INTEGER)")
					.map_err(query_error)
			})
			.await;
		assert!(matches!(result, Err(StorageError::Query { .. })));
	}

	#[tokio::test]
	async fn test_slow_closure_times_out() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("slow.db");
		create_database(&path);

		let source =
			SqliteSource::read_only(&path).with_query_timeout(Duration::from_millis(20));
		let result = source
			.with_connection(|_| {
				std::thread::sleep(Duration::from_millis(200));
				Ok(())
			})
			.await;
		assert!(matches!(
			result,
			Err(StorageError::Timeout { timeout_ms: 20 })
		));
	}

	/// Runs `SELECT 1` after a delay and reports whether it succeeded
	fn late_query(
		delay: Duration,
	) -> (
		impl FnOnce(&Connection) -> StorageResult<()> + Send + 'static,
		oneshot::Receiver<bool>,
	) {
		let (used_tx, used_rx) = oneshot::channel();
		let read = move |conn: &Connection| {
			std::thread::sleep(delay);
			let used = conn
				.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
				.is_ok();
			let _ = used_tx.send(used);
			Ok(())
		};
		(read, used_rx)
	}

	#[tokio::test]
	async fn test_timed_out_read_cannot_use_its_connection() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("slow.db");
		create_database(&path);

		let source =
			SqliteSource::read_only(&path).with_query_timeout(Duration::from_millis(20));
		let (read, used_rx) = late_query(Duration::from_millis(300));

		let result = source.with_connection(read).await;
		assert!(matches!(
			result,
			Err(StorageError::Timeout { timeout_ms: 20 })
		));

		// A dropped sender means the read never reached its query.
		let used = used_rx.await.unwrap_or(false);
		assert!(!used);
	}

	#[tokio::test]
	async fn test_dropped_read_cannot_use_its_connection() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("dropped.db");
		create_database(&path);

		let source = SqliteSource::read_only(&path);
		let (read, used_rx) = late_query(Duration::from_millis(300));

		let abandoned = timeout(Duration::from_millis(20), source.with_connection(read)).await;
		assert!(abandoned.is_err());

		let used = used_rx.await.unwrap_or(false);
		assert!(!used);
	}

	#[tokio::test]
	async fn test_completed_read_leaves_connection_usable() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("fast.db");
		create_database(&path);

		let source = SqliteSource::read_only(&path);
		let (read, used_rx) = late_query(Duration::ZERO);

		source.with_connection(read).await.expect("read");
		assert!(used_rx.await.expect("query ran"));
	}
}
