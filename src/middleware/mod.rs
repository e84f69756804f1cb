pub mod auth;
pub mod response;

pub use auth::{catalog_write_guard, require_bearer};
pub use response::{ApiResponse, ApiResult};
