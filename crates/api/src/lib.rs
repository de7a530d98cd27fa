//! Quote Aggregator API
//!
//! Axum routes and middleware for the service-call aggregation endpoint.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
