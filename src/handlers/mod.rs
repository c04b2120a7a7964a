// handlers - route handlers grouped by access level
//
// public   : no authentication (/ and /health)
// products : API key required (/api/products/*)
pub mod products;
pub mod public;

use crate::error::ApiError;

/// Fallback for any path without a route.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
