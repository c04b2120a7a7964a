use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::models::Product;
use crate::validation;

use super::payload_from;

#[derive(Debug, Serialize)]
pub struct DeletedProduct {
    pub message: &'static str,
    pub product: Product,
}

/// GET /api/products/:id - fetch a single product
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.products.get(&id)?))
}

/// PUT /api/products/:id - overwrite the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let payload = payload_from(body)?;
    let changes = validation::validate_changes(&payload)?;
    Ok(Json(state.products.update(&id, changes)?))
}

/// DELETE /api/products/:id - remove a product and echo it back
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeletedProduct>> {
    let Path(id) = id?;
    let product = state.products.delete(&id)?;
    Ok(Json(DeletedProduct {
        message: "Deleted",
        product,
    }))
}
