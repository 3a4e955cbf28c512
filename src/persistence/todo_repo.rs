//! Todo repository for `SQLite` persistence.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::models::todo::{TodoInput, TodoItem};
use crate::Result;

use super::db::{self, Database};
use super::store::TodoStore;

/// Repository wrapper around `SQLite` for todo records.
///
/// Each call opens its own session, issues a single statement, and
/// commits it when the statement mutates.
#[derive(Clone)]
pub struct TodoRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: i64,
}

impl TodoRow {
    fn into_item(self) -> TodoItem {
        TodoItem {
            id: self.id,
            title: self.title,
            description: self.description,
            completed: self.completed != 0,
        }
    }
}

impl TodoRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch all todo items ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<TodoItem>> {
        let mut session = db::new_session(&self.db).await?;
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, completed
             FROM todo_item
             ORDER BY id ASC",
        )
        .fetch_all(&mut *session)
        .await?;

        Ok(rows.into_iter().map(TodoRow::into_item).collect())
    }

    /// Retrieve a todo item by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<TodoItem>> {
        let mut session = db::new_session(&self.db).await?;
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, completed
             FROM todo_item
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *session)
        .await?;

        Ok(row.map(TodoRow::into_item))
    }

    /// Insert a new todo item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert or commit fails.
    pub async fn insert(&self, input: &TodoInput) -> Result<TodoItem> {
        let mut session = db::new_session(&self.db).await?;
        let row: TodoRow = sqlx::query_as(
            "INSERT INTO todo_item (title, description, completed)
             VALUES (?1, ?2, ?3)
             RETURNING id, title, description, completed",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(i64::from(input.completed))
        .fetch_one(&mut *session)
        .await?;
        session.commit().await?;

        debug!(todo_id = row.id, "todo created");
        Ok(row.into_item())
    }

    /// Overwrite title, description, and completion flag of an item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the update or commit fails.
    pub async fn replace(&self, id: i64, input: &TodoInput) -> Result<Option<TodoItem>> {
        let mut session = db::new_session(&self.db).await?;
        let row: Option<TodoRow> = sqlx::query_as(
            "UPDATE todo_item
             SET title = ?1, description = ?2, completed = ?3
             WHERE id = ?4
             RETURNING id, title, description, completed",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(i64::from(input.completed))
        .bind(id)
        .fetch_optional(&mut *session)
        .await?;
        session.commit().await?;

        if row.is_some() {
            debug!(todo_id = id, "todo updated");
        }
        Ok(row.map(TodoRow::into_item))
    }

    /// Delete a todo item, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete or commit fails.
    pub async fn remove(&self, id: i64) -> Result<Option<TodoItem>> {
        let mut session = db::new_session(&self.db).await?;
        let row: Option<TodoRow> = sqlx::query_as(
            "DELETE FROM todo_item
             WHERE id = ?1
             RETURNING id, title, description, completed",
        )
        .bind(id)
        .fetch_optional(&mut *session)
        .await?;
        session.commit().await?;

        if row.is_some() {
            debug!(todo_id = id, "todo deleted");
        }
        Ok(row.map(TodoRow::into_item))
    }
}

impl TodoStore for TodoRepo {
    fn list(&self) -> Pin<Box<dyn Future<Output = Result<Vec<TodoItem>>> + Send + '_>> {
        Box::pin(self.list_all())
    }

    fn get(&self, id: i64) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + '_>> {
        Box::pin(self.get_by_id(id))
    }

    fn create<'a>(
        &'a self,
        input: &'a TodoInput,
    ) -> Pin<Box<dyn Future<Output = Result<TodoItem>> + Send + 'a>> {
        Box::pin(self.insert(input))
    }

    fn update<'a>(
        &'a self,
        id: i64,
        input: &'a TodoInput,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + 'a>> {
        Box::pin(self.replace(id, input))
    }

    fn delete(
        &self,
        id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TodoItem>>> + Send + '_>> {
        Box::pin(self.remove(id))
    }
}
