//! Shared fixtures for router tests.

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase, seed};

/// The served application.
pub type App = NormalizePath<Router>;

/// App over a migrated, seeded in-memory database, plus a second handle
/// on the same pool so tests can inspect the store directly.
pub async fn seeded_app() -> (App, SqliteDatabase) {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    seed::load(&db).await.unwrap();

    let view = SqliteDatabase::from_pool(db.pool().clone());
    let app = routes::normalize(routes::create_router(AppState::new(db)));
    (app, view)
}

pub async fn send(app: &App, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Helper to parse JSON response body
pub async fn json_body(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
