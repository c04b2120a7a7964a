mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn public_routes_need_no_key() -> Result<()> {
    let server = common::empty_server().await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products"], 0);
    Ok(())
}

#[tokio::test]
async fn every_product_route_rejects_missing_key() -> Result<()> {
    let server = common::seeded_server().await?;
    let routes = [
        (Method::GET, "/api/products"),
        (Method::GET, "/api/products/search?q=widget"),
        (Method::GET, "/api/products/stats"),
        (Method::GET, "/api/products/some-id"),
        (Method::POST, "/api/products"),
        (Method::PUT, "/api/products/some-id"),
        (Method::DELETE, "/api/products/some-id"),
        (Method::GET, "/api/products/a/b"),
        (Method::PATCH, "/api/products/some-id"),
    ];

    for (method, path) in routes {
        let res = server
            .client
            .request(method.clone(), server.url(path))
            .json(&json!({}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], "Invalid or missing API key", "{} {}", method, path);
    }
    Ok(())
}

#[tokio::test]
async fn wrong_key_is_rejected_before_validation() -> Result<()> {
    let server = common::empty_server().await?;

    // Invalid payload with a wrong key: auth fails first, nothing is validated.
    let res = server
        .client
        .post(server.url("/api/products"))
        .header("x-api-key", "not-the-key")
        .json(&json!({ "name": "x" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Malformed body with no key is still a 401, not a 400.
    let res = server
        .client
        .post(server.url("/api/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn rejected_writes_do_not_touch_the_store() -> Result<()> {
    let server = common::empty_server().await?;

    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&common::widget())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.api(Method::GET, "/stats").send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["total"], 0);
    Ok(())
}

#[tokio::test]
async fn unconfigured_key_locks_the_api() -> Result<()> {
    let mut config = common::config();
    config.security.api_key = None;
    let server = common::TestServer::spawn(config).await?;

    let res = server.api(Method::GET, "").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unknown_product_subpath_needs_a_key_then_404s() -> Result<()> {
    let server = common::empty_server().await?;

    let res = server.client.get(server.url("/api/products/a/b")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.json::<serde_json::Value>().await?["error"],
        "Invalid or missing API key"
    );

    let res = server.api(Method::GET, "/a/b").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?["error"], "Route not found");
    Ok(())
}
