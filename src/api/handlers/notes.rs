//! Note management handlers.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderName, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::validate::{self, JsonBody};
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Database, NewNote, Note, NoteQuery, NoteRepository, NoteUpdate, ObjectId};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    #[schema(example = "000000000000000000000000")]
    pub id: String,
    #[schema(example = "5 life lessons learned from cats")]
    pub title: String,
    pub content: Option<String>,
    #[schema(example = "111111111111111111111100")]
    pub folder_id: Option<String>,
    /// Tag IDs in the order they were given
    #[schema(example = json!(["222222222222222222222200"]))]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Note> for NoteResponse {
    fn from(n: Note) -> Self {
        Self {
            id: n.id.to_hex(),
            title: n.title,
            content: n.content,
            folder_id: n.folder_id.map(|f| f.to_hex()),
            tags: n.tags.iter().map(ObjectId::to_hex).collect(),
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// Create or update note request DTO
///
/// On update, omitted fields are left unchanged and an empty `folderId`
/// removes the note from its folder.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    /// Note title (required, non-empty)
    #[schema(example = "5 life lessons learned from cats")]
    pub title: Option<String>,
    pub content: Option<String>,
    #[schema(example = "111111111111111111111100")]
    pub folder_id: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    /// Case-insensitive text to find in title or content
    #[param(example = "cats")]
    pub search_term: Option<String>,
    /// Only notes in this folder
    pub folder_id: Option<String>,
    /// Only notes carrying this tag
    pub tag_id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List notes
///
/// Returns notes matching the filters, most recently updated first
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Matching notes", body = Vec<NoteResponse>),
        (status = 400, description = "Malformed filter ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_notes<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let db_query = NoteQuery {
        search_term: query.search_term,
        folder_id: optional_id("folderId", query.folder_id)?,
        tag_id: optional_id("tagId", query.tag_id)?,
    };

    let notes = state.db().notes().find(&db_query).await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Get a note by ID
#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    tag = "notes",
    params(
        ("id" = String, Path, description = "Note ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let id = validate::parse_id("id", &id)?;

    let note = state
        .db()
        .notes()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(NoteResponse::from(note)))
}

/// Create a new note
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "notes",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse,
            headers(("Location" = String, description = "Path of the new note"))),
        (status = 400, description = "Missing title or invalid reference", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_note<D: Database>(
    State(state): State<AppState<D>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<NoteRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<NoteResponse>), ApiError> {
    let title = validate::required("title", req.title)?;

    let new_note = NewNote {
        title,
        content: req.content,
        folder_id: folder_ref(req.folder_id)?.flatten(),
        tags: tag_refs(req.tags)?.unwrap_or_default(),
    };

    let note = state.db().notes().create(&new_note).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, validate::location(&uri, note.id))],
        Json(NoteResponse::from(note)),
    ))
}

/// Update a note
///
/// The title is checked first, then the ID, then folder and tag references
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "notes",
    params(
        ("id" = String, Path, description = "Note ID (24 hex characters)")
    ),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 400, description = "Missing title, malformed ID or invalid reference", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<NoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let title = validate::required("title", req.title)?;
    let id = validate::parse_id("id", &id)?;

    let update = NoteUpdate {
        title,
        content: req.content,
        folder_id: folder_ref(req.folder_id)?,
        tags: tag_refs(req.tags)?,
    };

    let note = state
        .db()
        .notes()
        .find_by_id_and_update(id, &update)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(NoteResponse::from(note)))
}

/// Delete a note
///
/// Succeeds whether or not the note existed
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "notes",
    params(
        ("id" = String, Path, description = "Note ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate::parse_id("id", &id)?;

    state.db().notes().find_by_id_and_remove(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Filter id from the query string; empty means no filter.
fn optional_id(field: &str, raw: Option<String>) -> Result<Option<ObjectId>, ApiError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| validate::parse_id(field, &s))
        .transpose()
}

/// `None` when omitted, `Some(None)` when cleared with an empty string.
fn folder_ref(raw: Option<String>) -> Result<Option<Option<ObjectId>>, ApiError> {
    match raw.as_deref() {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(s) => validate::parse_id("folderId", s).map(|id| Some(Some(id))),
    }
}

/// Tag ids from the body, duplicates collapsed in first-seen order.
fn tag_refs(raw: Option<Value>) -> Result<Option<Vec<ObjectId>>, ApiError> {
    let items = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ApiError::InvalidArgument {
                message: "The `tags` property must be an array".to_string(),
            });
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    for item in &items {
        let id = item
            .as_str()
            .and_then(|s| ObjectId::parse(s).ok())
            .ok_or_else(|| ApiError::InvalidArgument {
                message: "The `tags` array contains an invalid `id`".to_string(),
            })?;
        if !tags.contains(&id) {
            tags.push(id);
        }
    }
    Ok(Some(tags))
}
