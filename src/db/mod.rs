//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! the HTTP layer.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Tag, Folder, Note)
//! - `object_id`: Record identifiers and their validity rule
//! - `repository`: Trait definitions for data access
//! - `seed`: Fixed seed data
//! - `sqlite`: SQLite implementation

mod error;
mod models;
mod object_id;
mod repository;
pub mod seed;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use object_id::{InvalidObjectId, ObjectId};
pub use repository::*;
pub use sqlite::SqliteDatabase;
