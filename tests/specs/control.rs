// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-plane specs over a real HTTP listener.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::prelude::*;

/// Serve the scenario's orchestrator on an ephemeral port.
async fn serve(s: &Scenario) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = sweep_daemon::router(Arc::clone(&s.orchestrator));
    tokio::spawn(async move { axum::serve(listener, app).await });
    addr
}

async fn post(addr: SocketAddr, body: Value) -> (u16, Value) {
    let reply = reqwest::Client::new()
        .post(format!("http://{addr}/automation"))
        .json(&body)
        .send()
        .await
        .unwrap();
    (reply.status().as_u16(), reply.json().await.unwrap())
}

async fn get(addr: SocketAddr) -> (u16, Value) {
    let reply = reqwest::get(format!("http://{addr}/automation")).await.unwrap();
    (reply.status().as_u16(), reply.json().await.unwrap())
}

fn start_body() -> Value {
    json!({
        "action": "start",
        "urls": "https://a.test/x\nhttps://b.test/y\nnot a url",
        "keywords": "OK, ok; Sold Out",
        "delay_ms": "250",
        "headless": "yes",
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn start_then_conflict_then_stop() {
    let s = Scenario::inert();
    let addr = serve(&s).await;

    let (status, body) = post(addr, start_body()).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["ok"], true);
    assert_eq!(body["state"]["running"], true);
    assert_eq!(body["state"]["total_count"], 2);
    assert_eq!(body["state"]["keywords"], json!(["OK", "Sold Out"]));

    let job = JobStore::new(&s.paths.job).load().unwrap().unwrap();
    assert_eq!(job.delay_ms, 1000, "clamped up to the minimum");
    assert!(job.headless);

    let (status, body) = post(addr, start_body()).await;
    assert_eq!(status, 409);
    assert_eq!(body["ok"], false);
    assert_eq!(body["state"]["running"], true);
    assert_eq!(s.launcher.spawned().len(), 1, "no second worker");

    let (status, body) = post(addr, json!({"action": "stop"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["state"]["stop_requested"], true);
    assert!(s.paths.stop.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_url_list_is_rejected_without_touching_files() {
    let s = Scenario::inert();
    let addr = serve(&s).await;

    let (status, body) =
        post(addr, json!({"action": "start", "urls": ["javascript:alert(1)", ""], "keywords": ["OK"]})).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "no valid URLs to process");
    assert!(!s.paths.job.exists());
    assert!(!s.paths.state.exists());
    assert!(s.launcher.spawned().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_status_reflects_dead_worker_immediately() {
    let s = Scenario::inert();
    let addr = serve(&s).await;
    post(addr, start_body()).await;

    s.probe.kill(WORKER_PID);
    let (status, body) = get(addr).await;

    assert_eq!(status, 200);
    assert_eq!(body["state"]["running"], false);
    assert_eq!(body["state"]["message"], "worker finished unexpectedly");
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_status_reads_from_the_daemon() {
    let s = Scenario::inert();
    let addr = serve(&s).await;
    post(addr, start_body()).await;

    let output = tokio::task::spawn_blocking(move || {
        assert_cmd::Command::cargo_bin("sweep")
            .unwrap()
            .env("NO_COLOR", "1")
            .args(["status", "-o", "json", "--daemon", &format!("http://{addr}")])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{output:?}");
    let state: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["running"], true);
    assert_eq!(state["pending_count"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_start_reports_conflict_exit_code() {
    let s = Scenario::inert();
    let addr = serve(&s).await;
    post(addr, start_body()).await;

    let output = tokio::task::spawn_blocking(move || {
        assert_cmd::Command::cargo_bin("sweep")
            .unwrap()
            .env("NO_COLOR", "1")
            .args(["start", "--url", "https://c.test/", "--keyword", "x", "--daemon", &format!("http://{addr}")])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already running"));
}
