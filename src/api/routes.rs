//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::normalize_path::NormalizePath;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::{ErrorResponse, not_found};
use super::handlers::{
    self, FolderRequest, FolderResponse, HealthResponse, NoteRequest, NoteResponse, TagRequest,
    TagResponse,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noteful API",
        version = "0.1.0",
        description = "Notes organised in folders and labelled with tags",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_tags,
        handlers::get_tag,
        handlers::create_tag,
        handlers::update_tag,
        handlers::delete_tag,
        handlers::list_folders,
        handlers::get_folder,
        handlers::create_folder,
        handlers::update_folder,
        handlers::delete_folder,
        handlers::list_notes,
        handlers::get_note,
        handlers::create_note,
        handlers::update_note,
        handlers::delete_note,
    ),
    components(
        schemas(
            HealthResponse,
            TagResponse,
            TagRequest,
            FolderResponse,
            FolderRequest,
            NoteResponse,
            NoteRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "tags", description = "Tag management endpoints"),
        (name = "folders", description = "Folder management endpoints"),
        (name = "notes", description = "Note management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with the store injected through `state`.
///
/// Resources live under `/api`; anything unmatched gets the generic 404.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    let tag_routes = routes!(D => {
        get "/tags" => handlers::list_tags,
        get "/tags/{id}" => handlers::get_tag,
        post "/tags" => handlers::create_tag,
        put "/tags/{id}" => handlers::update_tag,
        delete "/tags/{id}" => handlers::delete_tag,
    });

    let folder_routes = routes!(D => {
        get "/folders" => handlers::list_folders,
        get "/folders/{id}" => handlers::get_folder,
        post "/folders" => handlers::create_folder,
        put "/folders/{id}" => handlers::update_folder,
        delete "/folders/{id}" => handlers::delete_folder,
    });

    let note_routes = routes!(D => {
        get "/notes" => handlers::list_notes,
        get "/notes/{id}" => handlers::get_note,
        post "/notes" => handlers::create_note,
        put "/notes/{id}" => handlers::update_note,
        delete "/notes/{id}" => handlers::delete_note,
    });

    // Unsupported verbs on known paths get the same 404 as unknown paths
    let api_routes = tag_routes
        .merge(folder_routes)
        .merge(note_routes)
        .method_not_allowed_fallback(not_found);

    system_routes
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", api))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

/// Strip a trailing slash before routing, so `/api/tags/` matches `/api/tags`.
pub fn normalize(router: Router) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router)
}
