//! Storage layer for the ScoutIA Pro CLI
//!
//! A thin abstraction over the SQLite database, organized into:
//! - `models`: data structures
//! - `schema`: database connection and schema management
//! - `queries`: CRUD operations and the ranking view

pub mod models;
pub mod queries;
pub mod schema;

pub use models::*;
pub use schema::ScoutDatabase;
