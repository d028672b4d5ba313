mod common;

use axum::http::{StatusCode, header};
use serde_json::Value;
use shorts::domain::repositories::UsageRepository;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(&app.server, "alice", "secret1", "https://google.com").await;

    let response = app.server.get("/v1/s/1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header(header::LOCATION), "https://google.com");
}

#[tokio::test]
async fn test_redirect_records_use() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(&app.server, "alice", "secret1", "https://google.com").await;

    app.server.get("/v1/s/1").await;
    app.server.get("/v1/s/1").await;
    common::wait_for_uses(&app.usage, 2).await;

    let uses = app.usage.list_by_link(1).await.unwrap();
    assert_eq!(uses.len(), 2);
}

#[tokio::test]
async fn test_redirect_keeps_url_verbatim() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(
        &app.server,
        "alice",
        "secret1",
        "https://Example.com:8443/a/../b?q=1#frag",
    )
    .await;

    let response = app.server.get("/v1/s/1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header(header::LOCATION),
        "https://Example.com:8443/a/../b?q=1#frag"
    );
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let app = common::spawn_app();

    let response = app.server.get("/v1/s/zz").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["result"], "error");
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_non_canonical_code() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(&app.server, "alice", "secret1", "https://google.com").await;

    app.server.get("/v1/s/01").await.assert_status_not_found();
    app.server.get("/v1/s/A").await.assert_status_not_found();
    app.server.get("/v1/s/a-b").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_unknown_code_records_nothing() {
    let app = common::spawn_app();

    app.server.get("/v1/s/1").await.assert_status_not_found();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(app.usage.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_redirect_is_public() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(&app.server, "alice", "secret1", "https://google.com").await;

    // No Authorization header.
    let response = app.server.get("/v1/s/1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_unknown_path_fallback() {
    let app = common::spawn_app();

    let response = app.server.get("/nope").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["result"], "error");
    assert_eq!(json["error"]["message"], "Page not found");
}
