#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use shorts::application::services::UsageRecorder;
use shorts::domain::repositories::UsageRepository;
use shorts::domain::usage_worker::{WorkerSettings, run_usage_worker};
use shorts::infrastructure::cache::NullCache;
use shorts::routes::app_router;
use shorts::server::Repositories;
use shorts::state::AppState;

pub const TEST_SECRET: &str = "test-password-secret";

/// A running app over in-memory storage with the usage worker attached.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub usage: Arc<dyn UsageRepository>,
}

pub fn create_test_state(repositories: Repositories) -> AppState {
    let (recorder, rx) = UsageRecorder::channel(64);
    tokio::spawn(run_usage_worker(
        rx,
        repositories.usage.clone(),
        WorkerSettings::default(),
    ));

    AppState::new(
        repositories.links,
        repositories.usage,
        repositories.users,
        Arc::new(NullCache::new()),
        recorder,
        TEST_SECRET.to_string(),
    )
}

pub fn spawn_app() -> TestApp {
    let repositories = Repositories::memory();
    let usage = repositories.usage.clone();
    let state = create_test_state(repositories);
    let server = TestServer::new(app_router(state.clone(), false)).unwrap();

    TestApp {
        server,
        state,
        usage,
    }
}

pub fn basic_auth(name: &str, password: &str) -> (HeaderName, HeaderValue) {
    let encoded = STANDARD.encode(format!("{}:{}", name, password));
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
    )
}

pub async fn register(server: &TestServer, name: &str, password: &str) {
    server
        .post("/v1/users")
        .json(&json!({ "name": name, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

pub async fn create_short(server: &TestServer, name: &str, password: &str, full: &str) -> Value {
    let (key, value) = basic_auth(name, password);
    let response = server
        .post("/v1/shorts")
        .add_header(key, value)
        .json(&json!({ "full": full }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

/// Waits until the worker has persisted `expected` usage events in total.
pub async fn wait_for_uses(usage: &Arc<dyn UsageRepository>, expected: i64) {
    for _ in 0..100 {
        if usage.count().await.unwrap() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("usage worker did not persist {} events in time", expected);
}
