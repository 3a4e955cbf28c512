//! One handler per endpoint.
//!
//! Each handler performs exactly one store operation. Request bodies are
//! taken as raw bytes and run through [`TodoInput::from_json`](crate::models::todo::TodoInput::from_json).

use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use crate::models::todo::{TodoCreate, TodoResponse, TodoUpdate};
use crate::{AppError, Result};

use super::AppState;

/// Integer `{id}` path segment.
///
/// Rejections are reported as [`AppError::InvalidPath`] so they share the
/// JSON error body of every other failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidPath(rejection.body_text()))?;
        Ok(Self(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("todo {id} not found"))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /todos`
///
/// # Errors
///
/// Returns `AppError::Db` if the store fails.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>> {
    let items = state.store.list().await?;
    Ok(Json(items.into_iter().map(TodoResponse::from).collect()))
}

/// `GET /todos/{id}`
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id and
/// `AppError::InvalidPath` for a non-integer id.
pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>> {
    let item = state.store.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(item.into()))
}

/// `POST /todos`
///
/// # Errors
///
/// Returns `AppError::Validation` for a rejected payload.
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoResponse>)> {
    let input = TodoCreate::from_json(&body)?;
    let item = state.store.create(&input).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// `PUT /todos/{id}`
///
/// # Errors
///
/// Returns `AppError::InvalidPath` for a non-integer id,
/// `AppError::Validation` for a rejected payload and `AppError::NotFound`
/// for an unknown id.
pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    body: Bytes,
) -> Result<Json<TodoResponse>> {
    let input = TodoUpdate::from_json(&body)?;
    let item = state
        .store
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item.into()))
}

/// `DELETE /todos/{id}`
///
/// Responds with the removed item's last-known values.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id and
/// `AppError::InvalidPath` for a non-integer id.
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>> {
    let item = state.store.delete(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(item.into()))
}
