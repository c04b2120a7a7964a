// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::store::StoreError;
use crate::validation::ValidationErrors;

/// Every failure the pipeline can raise. Converted to a response exactly once,
/// by [`IntoResponse`] plus the error boundary middleware.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidJson(String),

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // Any other 4xx raised by the HTTP layer (405, 413, 415, ...)
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    // 500 Internal Server Error
    #[error("{message}")]
    Internal {
        message: String,
        causes: Vec<String>,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Http { status, .. } => *status,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Http { message, .. } => message,
            ApiError::Internal { message, .. } => message,
        }
    }

    /// Get error code used as the first line of the diagnostic trace
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::InvalidJson(_) => "InvalidJson",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Http { .. } => "HttpError",
            ApiError::Internal { .. } => "Internal",
        }
    }

    /// Diagnostic lines: `Code: message` followed by any recorded causes.
    pub fn trace(&self) -> Vec<String> {
        let mut lines = vec![format!("{}: {}", self.error_code(), self.message())];
        if let ApiError::Internal { causes, .. } = self {
            lines.extend(causes.iter().map(|cause| format!("caused by: {}", cause)));
        }
        lines
    }

    /// Convert to JSON response body
    pub fn to_json(&self, trace: Option<Vec<String>>) -> Value {
        let mut body = json!({ "error": self.message() });
        if let Some(trace) = trace {
            body["stack"] = json!(trace);
        }
        body
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Error for a bare status produced outside the handlers (router 405s and
    /// the like), named after the status's canonical reason.
    pub fn from_status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Request failed");
        match status {
            StatusCode::BAD_REQUEST => ApiError::invalid_json(reason),
            StatusCode::UNAUTHORIZED => ApiError::unauthorized(reason),
            StatusCode::NOT_FOUND => ApiError::not_found(reason),
            s if s.is_client_error() => ApiError::Http {
                status: s,
                message: reason.to_string(),
            },
            s => ApiError::Internal {
                message: "Internal Server Error".to_string(),
                causes: vec![format!("upstream status {}", s)],
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// Extractor rejections go through the same boundary as every other failure.
// Oversized bodies and a wrong content type keep their own status; anything
// wrong with the JSON itself is a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            status @ (StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE) => {
                ApiError::Http {
                    status,
                    message: rejection.body_text(),
                }
            }
            _ => ApiError::invalid_json(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::validation_error(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::not_found("Product not found"),
            StoreError::LockPoisoned => {
                tracing::error!("Product store lock poisoned");
                ApiError::Internal {
                    message: "Internal Server Error".to_string(),
                    causes: vec![err.to_string()],
                }
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Unhandled error: {:#}", err);
        ApiError::Internal {
            message: "Internal Server Error".to_string(),
            causes: err.chain().map(|cause| cause.to_string()).collect(),
        }
    }
}

// Automatic HTTP response conversion for Axum. The production-shaped body is
// rendered here; the error boundary re-renders it with a trace when enabled.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status_code(), Json(self.to_json(None))).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
