use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiResult;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Product Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Hello World from the Product Catalog API",
        "endpoints": {
            "products": "/api/products[/:id] (x-api-key required)",
            "search": "/api/products/search?q=term (x-api-key required)",
            "stats": "/api/products/stats (x-api-key required)",
            "health": "/health (public)"
        }
    }))
}

/// GET /health - liveness plus current catalog size
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let products = state.products.count()?;
    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "products": products
    })))
}
