pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;
pub mod validation;

pub use app::{app, AppState};
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
