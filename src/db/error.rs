//! Database error types.
//!
//! This module provides abstracted error types for store operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Store operation errors.
///
/// A missing record is not an error: lookups return `Option`.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    /// A unique index rejected the write (the store's duplicate-key error).
    #[error("Duplicate key: {entity_type} '{key}' already exists")]
    #[diagnostic(code(noteful::db::duplicate_key))]
    DuplicateKey { entity_type: String, key: String },

    #[error("Foreign key violation: {message}")]
    #[diagnostic(
        code(noteful::db::foreign_key),
        help("Make sure every referenced folder and tag exists")
    )]
    ForeignKey { message: String },

    #[error("Invalid data: {message} (hint: {help})")]
    #[diagnostic(code(noteful::db::invalid_data))]
    InvalidData { message: String, help: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(noteful::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(noteful::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(noteful::db::connection_error))]
    Connection { message: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
