//! Persistence layer modules.

pub mod db;
pub mod schema;
pub mod store;
pub mod todo_repo;
