//! Shared test helpers for HTTP-level integration tests.
//!
//! Provides construction of `AppState` over in-memory `SQLite`, request
//! builders, body decoding, and a real listener for end-to-end tests.

use std::sync::Arc;

use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use todo_service::api::{self, AppState};
use todo_service::persistence::db;
use todo_service::persistence::todo_repo::TodoRepo;
use todo_service::Result;

/// Build an `AppState` backed by a fresh in-memory database.
pub async fn test_app_state() -> (AppState, Arc<SqlitePool>) {
    let database = Arc::new(db::connect_memory().await.expect("db connect"));
    let state = AppState::new(Arc::new(TodoRepo::new(Arc::clone(&database))));
    (state, database)
}

/// Router over a fresh in-memory database.
pub async fn test_router() -> Router {
    let (state, _db) = test_app_state().await;
    api::router(state)
}

/// Request with a JSON body.
pub fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_owned())
        .expect("request")
}

/// Request without a body.
pub fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .expect("request")
}

/// Decode a response body as JSON.
pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Running server bound to an ephemeral port.
pub struct TestServer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// Cancel to begin graceful shutdown.
    pub ct: CancellationToken,
    /// Resolves once the server has drained.
    pub handle: JoinHandle<Result<()>>,
}

/// Serve `state` on `127.0.0.1:0`.
///
/// The listener is bound before spawning, so the server accepts
/// connections as soon as this returns.
pub async fn spawn_server(state: AppState) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral");
    let addr = listener.local_addr().expect("local addr");

    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    let handle = tokio::spawn(async move { api::serve(listener, state, server_ct).await });

    TestServer {
        base_url: format!("http://{addr}"),
        ct,
        handle,
    }
}
