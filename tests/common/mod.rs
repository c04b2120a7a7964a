#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::Router;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};

use product_catalog_api::{app, AppConfig, AppState};

pub const API_KEY: &str = "test-secret";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the router in-process on a free port.
    pub async fn spawn(config: AppConfig) -> Result<Self> {
        Self::serve(app(AppState::from_config(config))).await
    }

    /// Serve an arbitrary router; it must answer `GET /health`.
    pub async fn serve(router: Router) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server");
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request under /api/products carrying the correct API key.
    pub fn api(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(&format!("/api/products{}", path)))
            .header("x-api-key", API_KEY)
    }

    pub async fn create(&self, body: Value) -> Result<Value> {
        let res = self.api(reqwest::Method::POST, "").json(&body).send().await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json().await?)
    }
}

/// Development config with the test key and an empty catalog.
pub fn config() -> AppConfig {
    let mut config = AppConfig::development().with_api_key(API_KEY);
    config.catalog.seed_demo_products = false;
    config.api.enable_request_logging = false;
    config
}

pub async fn empty_server() -> Result<TestServer> {
    TestServer::spawn(config()).await
}

pub async fn seeded_server() -> Result<TestServer> {
    let mut config = config();
    config.catalog.seed_demo_products = true;
    TestServer::spawn(config).await
}

pub fn widget() -> Value {
    json!({
        "name": "Widget A",
        "description": "A useful widget",
        "price": 9.99,
        "category": "tools",
        "inStock": true
    })
}

pub fn product(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "price": 5,
        "category": category
    })
}
