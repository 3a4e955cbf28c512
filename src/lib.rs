#![forbid(unsafe_code)]

//! Minimal CRUD HTTP service for todo items backed by `SQLite`.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
