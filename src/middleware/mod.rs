pub mod auth;
pub mod errors;

pub use auth::api_key_middleware;
pub use errors::{error_boundary, panic_response};
