mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check_success() {
    let app = common::spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["usage_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_link_count() {
    let app = common::spawn_app();
    common::register(&app.server, "alice", "secret1").await;
    common::create_short(&app.server, "alice", "secret1", "https://google.com").await;

    let response = app.server.get("/health").await;

    let json = response.json::<Value>();
    assert_eq!(json["checks"]["storage"]["message"], "Connected, 1 links");
}
