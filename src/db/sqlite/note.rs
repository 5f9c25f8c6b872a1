//! SQLite NoteRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::helpers::{contains_pattern, current_timestamp, db_error, map_sqlx_error, stored_id};
use crate::db::{DbResult, NewNote, Note, NoteQuery, NoteRepository, NoteUpdate, ObjectId};

const ENTITY: &str = "note";

/// SQLx-backed note repository.
pub struct SqliteNoteRepository {
    pub(crate) pool: SqlitePool,
}

fn note_from_row(row: &SqliteRow, tags: Vec<ObjectId>) -> DbResult<Note> {
    let id: String = row.get("id");
    let folder_id: Option<String> = row.get("folder_id");

    Ok(Note {
        id: stored_id(&id)?,
        title: row.get("title"),
        content: row.get("content"),
        folder_id: folder_id.as_deref().map(stored_id).transpose()?,
        tags,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

async fn load_tags(conn: &mut SqliteConnection, note_id: &str) -> DbResult<Vec<ObjectId>> {
    let tag_ids: Vec<String> =
        sqlx::query_scalar("SELECT tag_id FROM note_tag WHERE note_id = ? ORDER BY position")
            .bind(note_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error)?;

    tag_ids.iter().map(|t| stored_id(t)).collect()
}

async fn load_note(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Note>> {
    let row = sqlx::query(
        "SELECT id, title, content, folder_id, created_at, updated_at FROM note WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error)?;

    match row {
        Some(row) => {
            let tags = load_tags(conn, id).await?;
            note_from_row(&row, tags).map(Some)
        }
        None => Ok(None),
    }
}

async fn insert_links(conn: &mut SqliteConnection, note_id: &str, tags: &[ObjectId]) -> DbResult<()> {
    for (position, tag_id) in tags.iter().enumerate() {
        sqlx::query("INSERT INTO note_tag (note_id, tag_id, position) VALUES (?, ?, ?)")
            .bind(note_id)
            .bind(tag_id.to_hex())
            .bind(position as i64)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(ENTITY, note_id, e))?;
    }
    Ok(())
}

async fn insert_note(conn: &mut SqliteConnection, note: &Note) -> DbResult<()> {
    let id = note.id.to_hex();

    sqlx::query(
        "INSERT INTO note (id, title, content, folder_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.folder_id.map(|f| f.to_hex()))
    .bind(&note.created_at)
    .bind(&note.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error(ENTITY, &id, e))?;

    insert_links(conn, &id, &note.tags).await
}

impl NoteRepository for SqliteNoteRepository {
    async fn find(&self, query: &NoteQuery) -> DbResult<Vec<Note>> {
        let pattern = query
            .search_term
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        let rows = sqlx::query(
            r"SELECT n.id, n.title, n.content, n.folder_id, n.created_at, n.updated_at
              FROM note n
              WHERE (?1 IS NULL OR n.title LIKE ?1 ESCAPE '\' OR n.content LIKE ?1 ESCAPE '\')
                AND (?2 IS NULL OR n.folder_id = ?2)
                AND (?3 IS NULL OR EXISTS (
                    SELECT 1 FROM note_tag nt WHERE nt.note_id = n.id AND nt.tag_id = ?3))
              ORDER BY n.updated_at DESC, n.id DESC",
        )
        .bind(pattern)
        .bind(query.folder_id.map(|f| f.to_hex()))
        .bind(query.tag_id.map(|t| t.to_hex()))
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row.get("id");
            let tags = load_tags(&mut *conn, &id).await?;
            notes.push(note_from_row(row, tags)?);
        }
        Ok(notes)
    }

    async fn find_by_id(&self, id: ObjectId) -> DbResult<Option<Note>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;
        load_note(&mut *conn, &id.to_hex()).await
    }

    async fn create(&self, note: &NewNote) -> DbResult<Note> {
        let now = current_timestamp();
        let created = Note {
            id: ObjectId::new(),
            title: note.title.clone(),
            content: note.content.clone(),
            folder_id: note.folder_id,
            tags: note.tags.clone(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        insert_note(&mut *tx, &created).await?;
        tx.commit().await.map_err(db_error)?;

        tracing::debug!(entity = ENTITY, id = %created.id, "created");
        Ok(created)
    }

    async fn find_by_id_and_update(
        &self,
        id: ObjectId,
        update: &NoteUpdate,
    ) -> DbResult<Option<Note>> {
        let hex = id.to_hex();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let Some(mut note) = load_note(&mut *tx, &hex).await? else {
            return Ok(None);
        };

        note.title = update.title.clone();
        if let Some(content) = &update.content {
            note.content = Some(content.clone());
        }
        if let Some(folder_id) = update.folder_id {
            note.folder_id = folder_id;
        }
        note.updated_at = current_timestamp();

        sqlx::query(
            "UPDATE note SET title = ?, content = ?, folder_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.folder_id.map(|f| f.to_hex()))
        .bind(&note.updated_at)
        .bind(&hex)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, &hex, e))?;

        if let Some(tags) = &update.tags {
            sqlx::query("DELETE FROM note_tag WHERE note_id = ?")
                .bind(&hex)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            insert_links(&mut *tx, &hex, tags).await?;
            note.tags = tags.clone();
        }

        tx.commit().await.map_err(db_error)?;
        Ok(Some(note))
    }

    async fn find_by_id_and_remove(&self, id: ObjectId) -> DbResult<Option<Note>> {
        let hex = id.to_hex();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let Some(note) = load_note(&mut *tx, &hex).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM note WHERE id = ?")
            .bind(&hex)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(Some(note))
    }

    async fn insert_many(&self, notes: &[Note]) -> DbResult<usize> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        for note in notes {
            insert_note(&mut *tx, note).await?;
        }
        tx.commit().await.map_err(db_error)?;
        Ok(notes.len())
    }

    async fn count(&self) -> DbResult<usize> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM note")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(total as usize)
    }
}
