//! HTTP surface for the todo resource.
//!
//! Builds the axum [`Router`] over a shared [`AppState`] and runs it on a
//! bound listener until the cancellation token fires. Each request is
//! wrapped in an `http_request` span carrying a generated request id.

pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::GlobalConfig;
use crate::persistence::store::TodoStore;
use crate::{AppError, Result};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for todo items.
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    /// Wrap a store implementation.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn trace_request(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "http_request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let started = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        parent: &span,
        status = response.status().as_u16(),
        elapsed_ms,
        "request completed"
    );
    response
}

/// Bind the HTTP listener described by `config`.
///
/// # Errors
///
/// Returns `AppError::Io` if the address cannot be bound.
pub async fn bind(config: &GlobalConfig) -> Result<TcpListener> {
    let addr = config.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|err| AppError::Io(format!("failed to bind {addr}: {err}")))
}

/// Serve the router on `listener` until `ct` is cancelled.
///
/// In-flight requests are drained before returning.
///
/// # Errors
///
/// Returns `AppError::Io` if the server fails.
pub async fn serve(listener: TcpListener, state: AppState, ct: CancellationToken) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .map_err(|err| AppError::Io(format!("failed to read local address: {err}")))?;
    info!(%local_addr, "starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            ct.cancelled().await;
        })
        .await
        .map_err(|err| AppError::Io(format!("HTTP server error: {err}")))?;

    info!("HTTP server shut down");
    Ok(())
}
