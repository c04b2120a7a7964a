// handlers/products - product API (API key required on every route)
//
// GET    /api/products          list, filtered by ?category, paged by ?page&limit
// POST   /api/products          create (full validation)
// GET    /api/products/search   ?q= name search
// GET    /api/products/stats    counts by category
// GET    /api/products/:id      fetch one
// PUT    /api/products/:id      update (partial validation)
// DELETE /api/products/:id      remove

pub mod collection;
pub mod query;
pub mod record;

pub use collection::create;
pub use collection::list;

pub use query::search;
pub use query::stats;

pub use record::delete;
pub use record::get;
pub use record::update;

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::ProductPayload;

/// Unwrap a JSON body into a product payload; only objects are accepted.
pub(crate) fn payload_from(body: Result<Json<Value>, JsonRejection>) -> ApiResult<ProductPayload> {
    let Json(value) = body?;
    ProductPayload::from_value(value)
        .ok_or_else(|| ApiError::invalid_json("Request body must be a JSON object"))
}
