pub mod auth;
pub mod response;
pub mod role;

pub use auth::{jwt_auth_middleware, AuthUser, AUTH_HEADER};
pub use response::{ApiResponse, ApiResult};
pub use role::{require_admin, require_citizen};
