//! Folder management handlers.

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
use crate::db::{Database, Folder, NamedRepository};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Folder response DTO
#[derive(Serialize, ToSchema)]
pub struct FolderResponse {
    /// Unique identifier (24 hex characters)
    #[schema(example = "111111111111111111111100")]
    pub id: String,
    /// Folder name, unique across folders
    #[schema(example = "Archive")]
    pub name: String,
}

impl From<Folder> for FolderResponse {
    fn from(f: Folder) -> Self {
        Self {
            id: f.id.to_hex(),
            name: f.name,
        }
    }
}

/// Create or rename folder request DTO
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FolderRequest {
    /// Folder name (required, non-empty)
    #[schema(example = "Archive")]
    pub name: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all folders
///
/// Returns every folder sorted by name
#[utoipa::path(
    get,
    path = "/api/folders",
    tag = "folders",
    responses(
        (status = 200, description = "Folders sorted by name", body = Vec<FolderResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_folders<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.db().folders().find().await?;

    Ok(Json(folders.into_iter().map(FolderResponse::from).collect()))
}

/// Get a folder by ID
#[utoipa::path(
    get,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Folder found", body = FolderResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_folder<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<FolderResponse>, ApiError> {
    let id = validate::parse_id("id", &id)?;

    let folder = state
        .db()
        .folders()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(FolderResponse::from(folder)))
}

/// Create a new folder
///
/// Creates a folder and returns it with its location
#[utoipa::path(
    post,
    path = "/api/folders",
    tag = "folders",
    request_body = FolderRequest,
    responses(
        (status = 201, description = "Folder created", body = FolderResponse,
            headers(("Location" = String, description = "Path of the new folder"))),
        (status = 400, description = "Missing name or duplicate name", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_folder<D: Database>(
    State(state): State<AppState<D>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<FolderRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<FolderResponse>), ApiError> {
    let name = validate::required("name", req.name)?;

    let folder = state.db().folders().create(&name).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, validate::location(&uri, folder.id))],
        Json(FolderResponse::from(folder)),
    ))
}

/// Rename a folder
///
/// The name is checked before the ID
#[utoipa::path(
    put,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID (24 hex characters)")
    ),
    request_body = FolderRequest,
    responses(
        (status = 200, description = "Folder updated", body = FolderResponse),
        (status = 400, description = "Missing name, malformed ID or duplicate name", body = ErrorResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_folder<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<FolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let name = validate::required("name", req.name)?;
    let id = validate::parse_id("id", &id)?;

    let folder = state
        .db()
        .folders()
        .find_by_id_and_update(id, &name)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(FolderResponse::from(folder)))
}

/// Delete a folder
///
/// Succeeds whether or not the folder existed. Notes filed in the folder
/// are left unfiled.
#[utoipa::path(
    delete,
    path = "/api/folders/{id}",
    tag = "folders",
    params(
        ("id" = String, Path, description = "Folder ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Folder deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_folder<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = validate::parse_id("id", &id)?;

    state.db().folders().find_by_id_and_remove(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
