//! Storage abstraction consumed by the HTTP handlers.
//!
//! The [`TodoStore`] trait decouples request handling from the concrete
//! database so the router can be driven by any backing store. Every
//! operation maps to exactly one storage statement.

use std::future::Future;
use std::pin::Pin;

use crate::models::todo::{TodoInput, TodoItem};
use crate::Result;

/// Five-operation interface over persisted todo items.
pub trait TodoStore: Send + Sync {
    /// Fetch every item in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the query fails.
    fn list(&self) -> Pin<Box<dyn Future<Output = Result<Vec<TodoItem>>> + Send + '_>>;

    /// Fetch a single item, or `None` when `id` matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the query fails.
    fn get(&self, id: i64) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + '_>>;

    /// Insert a new item and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the insert fails.
    fn create<'a>(
        &'a self,
        input: &'a TodoInput,
    ) -> Pin<Box<dyn Future<Output = Result<TodoItem>> + Send + 'a>>;

    /// Replace every mutable field of an item.
    ///
    /// Returns `None` when `id` matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the update fails.
    fn update<'a>(
        &'a self,
        id: i64,
        input: &'a TodoInput,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + 'a>>;

    /// Permanently remove an item, returning its last-known values.
    ///
    /// Returns `None` when `id` matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the delete fails.
    fn delete(
        &self,
        id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + '_>>;
}
