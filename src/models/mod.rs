//! Domain model module declarations.

pub mod todo;
