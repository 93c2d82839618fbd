// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use sweep_adapters::{FakeLauncher, FakeProbe};
use sweep_core::FakeClock;
use sweep_storage::RuntimePaths;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::orchestrator::FixedLocator;

struct Fixture {
    _dir: TempDir,
    launcher: FakeLauncher,
    orchestrator: Shared<FakeClock>,
}

fn fixture_with(launcher: FakeLauncher, locator: FixedLocator) -> Fixture {
    let dir = TempDir::new().unwrap();
    let orchestrator = Orchestrator::new(
        RuntimePaths::under(dir.path()),
        Arc::new(launcher.clone()),
        Arc::new(FakeProbe::new().alive(4242)),
        Arc::new(locator),
        FakeClock::new(),
    )
    .with_spawn_grace(Duration::ZERO);
    Fixture { _dir: dir, launcher, orchestrator: Arc::new(orchestrator) }
}

fn fixture() -> Fixture {
    fixture_with(FakeLauncher::new(), FixedLocator::found("/bin/sweep-worker"))
}

async fn send(f: &Fixture, method: Method, uri: &str, body: &str) -> (StatusCode, ApiResponse) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router(Arc::clone(&f.orchestrator)).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const START: &str = r#"{"action":"start","urls":"https://a.test/x\nhttps://b.test/y","keywords":"OK"}"#;

#[tokio::test]
async fn get_reports_idle_status() {
    let f = fixture();
    let (status, body) = send(&f, Method::GET, "/automation", "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.ok);
    assert_eq!(body.state.unwrap().message, "idle");
}

#[tokio::test]
async fn get_accepts_status_action() {
    let f = fixture();
    for uri in ["/automation?action=status", "/automation?action=%20Status%20"] {
        let (status, body) = send(&f, Method::GET, uri, "").await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.ok);
    }
}

#[tokio::test]
async fn get_rejects_mutating_actions() {
    let f = fixture();
    let (status, body) = send(&f, Method::GET, "/automation?action=start", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.ok);
    assert!(f.launcher.spawned().is_empty());
}

#[tokio::test]
async fn post_without_action_is_status() {
    let f = fixture();
    let (status, body) = send(&f, Method::POST, "/automation", "not json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.ok);
}

#[tokio::test]
async fn post_unknown_action_is_bad_request() {
    let f = fixture();
    let (status, body) = send(&f, Method::POST, "/automation", r#"{"action":"restart"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error.as_deref(), Some("unsupported action: restart"));
}

#[tokio::test]
async fn post_start_returns_running_state() {
    let f = fixture();
    let (status, body) = send(&f, Method::POST, "/automation", START).await;

    assert_eq!(status, StatusCode::OK);
    let state = body.state.unwrap();
    assert!(state.running);
    assert_eq!(state.total_count, 2);
    assert_eq!(state.keywords, vec!["OK"]);
    assert_eq!(f.launcher.spawned().len(), 1);
}

#[tokio::test]
async fn post_start_with_no_urls_is_bad_request() {
    let f = fixture();
    let body = r#"{"action":"start","urls":["mailto:x@y.test"],"keywords":["OK"]}"#;
    let (status, reply) = send(&f, Method::POST, "/automation", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.error.as_deref(), Some("no valid URLs to process"));
    assert!(reply.state.is_none());
}

#[tokio::test]
async fn second_start_conflicts_with_state() {
    let f = fixture();
    send(&f, Method::POST, "/automation", START).await;

    let (status, body) = send(&f, Method::POST, "/automation", START).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!body.ok);
    assert!(body.state.unwrap().running);
    assert_eq!(f.launcher.spawned().len(), 1);
}

#[tokio::test]
async fn runtime_unavailable_is_server_error_with_rollback() {
    let f = fixture_with(FakeLauncher::new(), FixedLocator::missing("sweep-worker not found"));
    let (status, body) = send(&f, Method::POST, "/automation", START).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let state = body.state.unwrap();
    assert!(!state.running);
    assert_eq!(state.message, "automation runtime unavailable");
}

#[tokio::test]
async fn stop_is_idempotent() {
    let f = fixture();
    send(&f, Method::POST, "/automation", START).await;

    let (first, a) = send(&f, Method::POST, "/automation", r#"{"action":"stop"}"#).await;
    let (second, b) = send(&f, Method::POST, "/automation", r#"{"action":"STOP"}"#).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert!(a.state.unwrap().stop_requested);
    assert!(b.state.unwrap().stop_requested);
}

#[tokio::test]
async fn other_methods_are_rejected_as_json() {
    let f = fixture();
    let (status, body) = send(&f, Method::DELETE, "/automation", "").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body.error.as_deref(), Some("method not allowed"));
}
