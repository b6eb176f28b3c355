pub mod auth;
pub mod response;

pub use auth::auth_gate;
pub use response::{ApiResponse, ApiResult};
