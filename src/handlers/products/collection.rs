use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::models::Product;
use crate::store::{ListQuery, Page};
use crate::validation;

use super::payload_from;

/// GET /api/products - list products with optional category filter and paging
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Page>> {
    let Query(pairs) = query?;
    let page = state.products.list(&ListQuery::from_pairs(&pairs))?;
    Ok(Json(page))
}

/// POST /api/products - create a product from a full payload
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let payload = payload_from(body)?;
    let new = validation::validate_new(&payload)?;
    let product = state.products.create(new)?;
    Ok((StatusCode::CREATED, Json(product)))
}
