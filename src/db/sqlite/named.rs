//! SQLite repository for uniquely named collections (tags and folders).

use std::marker::PhantomData;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{db_error, map_sqlx_error, stored_id};
use crate::db::{DbResult, Named, NamedRepository, ObjectId};

/// SQLx-backed repository over the table named by `R::COLLECTION`.
pub struct SqliteNamedRepository<R> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Named> SqliteNamedRepository<R> {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

fn record_from_row<R: Named>(row: &SqliteRow) -> DbResult<R> {
    let id: String = row.get("id");
    Ok(R::from_parts(stored_id(&id)?, row.get("name")))
}

impl<R: Named> NamedRepository for SqliteNamedRepository<R> {
    type Record = R;

    async fn find(&self) -> DbResult<Vec<R>> {
        let sql = format!("SELECT id, name FROM {} ORDER BY name ASC", R::COLLECTION);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(record_from_row::<R>).collect()
    }

    async fn find_by_id(&self, id: ObjectId) -> DbResult<Option<R>> {
        let sql = format!("SELECT id, name FROM {} WHERE id = ?", R::COLLECTION);

        let row = sqlx::query(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(record_from_row::<R>).transpose()
    }

    async fn create(&self, name: &str) -> DbResult<R> {
        let id = ObjectId::new();
        let sql = format!("INSERT INTO {} (id, name) VALUES (?, ?)", R::COLLECTION);

        sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(R::ENTITY, name, e))?;

        tracing::debug!(entity = R::ENTITY, %id, "created");
        Ok(R::from_parts(id, name.to_string()))
    }

    async fn find_by_id_and_update(&self, id: ObjectId, name: &str) -> DbResult<Option<R>> {
        let sql = format!(
            "UPDATE {} SET name = ? WHERE id = ? RETURNING id, name",
            R::COLLECTION
        );

        let row = sqlx::query(&sql)
            .bind(name)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(R::ENTITY, name, e))?;

        row.as_ref().map(record_from_row::<R>).transpose()
    }

    async fn find_by_id_and_remove(&self, id: ObjectId) -> DbResult<Option<R>> {
        let sql = format!(
            "DELETE FROM {} WHERE id = ? RETURNING id, name",
            R::COLLECTION
        );

        let row = sqlx::query(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(record_from_row::<R>).transpose()
    }

    async fn insert_many(&self, records: &[R]) -> DbResult<usize> {
        let sql = format!("INSERT INTO {} (id, name) VALUES (?, ?)", R::COLLECTION);
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for record in records {
            sqlx::query(&sql)
                .bind(record.id().to_hex())
                .bind(record.name())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(R::ENTITY, record.name(), e))?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(records.len())
    }

    async fn count(&self) -> DbResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::COLLECTION);

        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(total as usize)
    }
}
