//! Time source used for warranty evaluation

use chrono::{DateTime, Utc};

/// Source of the current instant
///
/// Warranty status is computed against "now" at request time; injecting the
/// clock keeps that comparison deterministic in tests.
pub trait Clock: Send + Sync {
	fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
	pub fn new(instant: DateTime<Utc>) -> Self {
		Self(instant)
	}
}

impl Clock for FixedClock {
	fn now(&self) -> DateTime<Utc> {
		self.0
	}
}
