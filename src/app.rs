use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::ApiKeyGate;
use crate::config::AppConfig;
use crate::handlers;
use crate::middleware;
use crate::store::{InMemoryProductStore, ProductRepository};

/// Shared per-process state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub products: Arc<dyn ProductRepository>,
    pub gate: ApiKeyGate,
}

impl AppState {
    pub fn new(config: AppConfig, products: Arc<dyn ProductRepository>) -> Self {
        let gate = ApiKeyGate::new(config.security.api_key.clone());
        Self {
            config: Arc::new(config),
            products,
            gate,
        }
    }

    /// In-memory store, seeded with the demo products when configured.
    pub fn from_config(config: AppConfig) -> Self {
        let store = if config.catalog.seed_demo_products {
            InMemoryProductStore::with_demo_products()
        } else {
            InMemoryProductStore::new()
        };
        Self::new(config, Arc::new(store))
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Protected product API
        .nest("/api/products", product_routes(state.clone()))
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::error_boundary,
                ))
                .layer(CatchPanicLayer::custom(middleware::panic_response))
                .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes)),
        );

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn product_routes(state: AppState) -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/search", get(products::search))
        .route("/stats", get(products::stats))
        .route(
            "/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .fallback(handlers::route_not_found)
        // Runs before any extractor, so bodies are never parsed for rejected callers.
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::api_key_middleware,
        ))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect::<Vec<HeaderValue>>();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
