//! Centralized fixtures for integration tests
//!
//! SQLite database fixtures and a oneshot-driven test app shared across the
//! integration test files.

pub mod fixtures;
pub mod test_app;

#[allow(unused_imports)]
pub use fixtures::SqliteFixture;
#[allow(unused_imports)]
pub use test_app::TestApp;
