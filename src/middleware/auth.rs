use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::API_KEY_HEADER;
use crate::error::ApiError;

/// API key middleware guarding every product route. Rejected requests never
/// reach validation or the store.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = state.gate.check(credential) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request: {}",
            err
        );
        return Err(err.into());
    }

    Ok(next.run(request).await)
}
