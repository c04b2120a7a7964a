use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::app::AppState;
use crate::error::ApiResult;
use crate::store::{first_value, CatalogStats, SearchResult};

/// GET /api/products/search?q=term - case-insensitive name search, unpaged
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<SearchResult>> {
    let Query(pairs) = query?;
    let term = first_value(&pairs, "q").unwrap_or_default();
    Ok(Json(state.products.search(term)?))
}

/// GET /api/products/stats - totals per category
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<CatalogStats>> {
    Ok(Json(state.products.stats()?))
}
