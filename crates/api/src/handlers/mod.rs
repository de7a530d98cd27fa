pub mod common;
pub mod health;
pub mod service_calls;

pub use common::ApiError;
pub use health::{health, ready};
pub use service_calls::get_service_call;
