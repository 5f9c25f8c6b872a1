//! Tag management handlers.

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::{HeaderName, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::validate::{self, JsonBody};
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Database, NamedRepository, Tag};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Tag response DTO
#[derive(Serialize, ToSchema)]
pub struct TagResponse {
    /// Unique identifier (24 hex characters)
    #[schema(example = "222222222222222222222200")]
    pub id: String,
    /// Tag name, unique across tags
    #[schema(example = "foo")]
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id.to_hex(),
            name: t.name,
        }
    }
}

/// Create or rename tag request DTO
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TagRequest {
    /// Tag name (required, non-empty)
    #[schema(example = "foo")]
    pub name: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all tags
///
/// Returns every tag sorted by name
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "Tags sorted by name", body = Vec<TagResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_tags<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state.db().tags().find().await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Get a tag by ID
#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = String, Path, description = "Tag ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Tag found", body = TagResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tag<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TagResponse>, ApiError> {
    let id = validate::parse_id("id", &id)?;

    let tag = state
        .db()
        .tags()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(TagResponse::from(tag)))
}

/// Create a new tag
///
/// Creates a tag and returns it with its location
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "tags",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse,
            headers(("Location" = String, description = "Path of the new tag"))),
        (status = 400, description = "Missing name or duplicate name", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_tag<D: Database>(
    State(state): State<AppState<D>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<TagRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TagResponse>), ApiError> {
    let name = validate::required("name", req.name)?;

    let tag = state.db().tags().create(&name).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, validate::location(&uri, tag.id))],
        Json(TagResponse::from(tag)),
    ))
}

/// Rename a tag
///
/// The name is checked before the ID
#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = String, Path, description = "Tag ID (24 hex characters)")
    ),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagResponse),
        (status = 400, description = "Missing name, malformed ID or duplicate name", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_tag<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TagRequest>,
) -> Result<Json<TagResponse>, ApiError> {
    let name = validate::required("name", req.name)?;
    let id = validate::parse_id("id", &id)?;

    let tag = state
        .db()
        .tags()
        .find_by_id_and_update(id, &name)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(TagResponse::from(tag)))
}

/// Delete a tag
///
/// Succeeds whether or not the tag existed. The tag is also removed from
/// every note carrying it.
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = "tags",
    params(
        ("id" = String, Path, description = "Tag ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_tag<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate::parse_id("id", &id)?;

    state.db().tags().find_by_id_and_remove(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
