use std::any::Any;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Single point where failures become HTTP bodies. Handlers and inner
/// middleware return [`ApiError`]; its response carries the error in the
/// extensions and is re-rendered here, with a `stack` outside production.
/// Error statuses produced without one (the router's 405) get an error
/// built from the status.
pub async fn error_boundary(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();
    let err = match response.extensions_mut().remove::<ApiError>() {
        Some(err) => err,
        None if status.is_client_error() || status.is_server_error() => {
            ApiError::from_status(status)
        }
        None => return response,
    };

    match &err {
        ApiError::Internal { .. } => tracing::error!(%method, %path, "{}", err),
        _ => tracing::debug!(%method, %path, status = %err.status_code(), "{}", err),
    }

    let trace = state.config.include_error_trace().then(|| {
        let mut lines = err.trace();
        lines.push(format!("at {} {}", method, path));
        lines
    });

    let mut rendered = (err.status_code(), Json(err.to_json(trace))).into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        rendered.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rendered
}

/// Turns a handler panic into an `Internal` error for the boundary to render.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal {
        message: "Internal Server Error".to_string(),
        causes: vec![format!("panic: {}", detail)],
    }
    .into_response()
}
