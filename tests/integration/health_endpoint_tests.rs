//! Integration tests for the HTTP health endpoint.
//!
//! Validates that `GET /health` returns `200 OK` with body `"ok"` on a
//! real listener bound to an ephemeral port.

use super::test_helpers::{spawn_server, test_app_state};

// ── GET /health returns 200 OK ───────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let (state, _db) = test_app_state().await;
    let server = spawn_server(state).await;

    let resp = reqwest::get(format!("{}/health", server.base_url))
        .await
        .expect("HTTP GET /health");

    assert_eq!(resp.status(), 200);
    let body = resp.text().await.expect("body");
    assert_eq!(body, "ok");

    server.ct.cancel();
}

// ── Non-existent route returns 404 ──────────────────────────

#[tokio::test]
async fn non_existent_route_returns_404() {
    let (state, _db) = test_app_state().await;
    let server = spawn_server(state).await;

    let resp = reqwest::get(format!("{}/nonexistent", server.base_url))
        .await
        .expect("HTTP GET /nonexistent");

    assert_eq!(resp.status(), 404);
    server.ct.cancel();
}
