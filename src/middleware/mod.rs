pub mod auth;
pub mod response;

pub use auth::{basic_auth_middleware, AuthUser};
pub use response::{envelope_method_not_allowed, ApiResponse, ApiResult};
