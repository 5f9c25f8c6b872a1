//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::named::SqliteNamedRepository;
use super::note::SqliteNoteRepository;
use crate::db::{Database, DbError, DbResult, Folder, Tag};

/// SQLite database implementation.
///
/// Repositories share the connection pool, which is cheap to clone.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Limited to a single connection that is never recycled, since every
    /// SQLite in-memory connection is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema is not migrated.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Tags = SqliteNamedRepository<Tag>;
    type Folders = SqliteNamedRepository<Folder>;
    type Notes = SqliteNoteRepository;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn tags(&self) -> Self::Tags {
        SqliteNamedRepository::new(self.pool.clone())
    }

    fn folders(&self) -> Self::Folders {
        SqliteNamedRepository::new(self.pool.clone())
    }

    fn notes(&self) -> Self::Notes {
        SqliteNoteRepository {
            pool: self.pool.clone(),
        }
    }
}
