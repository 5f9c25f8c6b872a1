//! Integration tests for Note API endpoints.

use axum::http::{StatusCode, header};
use serde_json::json;

use super::test_support::{delete, get, json_body, seeded_app, send, with_json};
use crate::db::{Database, NoteRepository, ObjectId, seed};

// =============================================================================
// GET /api/notes
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_returns_every_note_newest_first() {
    let (app, db) = seeded_app().await;

    let response = send(&app, get("/api/notes")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), db.notes().count().await.unwrap());

    let updated: Vec<&str> = notes
        .iter()
        .map(|n| n["updatedAt"].as_str().unwrap())
        .collect();
    let mut sorted = updated.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(updated, sorted);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_filters_by_search_term() {
    let (app, _db) = seeded_app().await;

    let body = json_body(send(&app, get("/api/notes?searchTerm=gaga")).await).await;
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "7 things lady gaga has in common with cats");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_filters_by_folder_and_tag() {
    let (app, _db) = seeded_app().await;
    let folder = seed::folders()[1].id;
    let tag = seed::tags()[0].id;

    let body = json_body(send(&app, get(&format!("/api/notes?folderId={}", folder))).await).await;
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["folderId"], folder.to_hex());

    let body = json_body(send(&app, get(&format!("/api/notes?tagId={}", tag))).await).await;
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert!(
        notes
            .iter()
            .all(|n| n["tags"].as_array().unwrap().contains(&json!(tag.to_hex())))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_with_malformed_filter_is_400() {
    let (app, _db) = seeded_app().await;

    let response = send(&app, get("/api/notes?folderId=99-99-99")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "The `folderId` is not valid"
    );
}

// =============================================================================
// GET /api/notes/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_note_returns_all_fields() {
    let (app, _db) = seeded_app().await;
    let note = &seed::notes()[1];

    let response = send(&app, get(&format!("/api/notes/{}", note.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"], note.id.to_hex());
    assert_eq!(body["title"], note.title);
    assert_eq!(body["folderId"], note.folder_id.unwrap().to_hex());
    assert_eq!(
        body["tags"],
        json!(note.tags.iter().map(ObjectId::to_hex).collect::<Vec<_>>())
    );
    assert_eq!(body["createdAt"], note.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_note_errors() {
    let (app, _db) = seeded_app().await;

    let response = send(&app, get("/api/notes/99-99-99")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "The `id` is not valid");

    let response = send(&app, get("/api/notes/AAAAAAAAAAAAAAAAAAAAAAAA")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// POST /api/notes
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_note_with_valid_data() {
    let (app, db) = seeded_app().await;
    let folder = seed::folders()[2].id.to_hex();
    let tags = vec![seed::tags()[3].id.to_hex(), seed::tags()[0].id.to_hex()];

    let response = send(
        &app,
        with_json(
            "POST",
            "/api/notes",
            json!({"title": "New note", "content": "Body", "folderId": folder, "tags": tags}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(location, format!("/api/notes/{}", id));
    assert_eq!(body["title"], "New note");
    assert_eq!(body["content"], "Body");
    assert_eq!(body["folderId"], folder);
    assert_eq!(body["tags"], json!(tags));

    let stored = db
        .notes()
        .find_by_id(ObjectId::parse(id).unwrap())
        .await
        .unwrap()
        .expect("Note should be stored");
    assert_eq!(stored.title, "New note");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_note_without_title_is_400() {
    let (app, _db) = seeded_app().await;

    let response = send(&app, with_json("POST", "/api/notes", json!({"content": "x"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Missing `title` in request body"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_note_validates_references() {
    let (app, _db) = seeded_app().await;

    let response = send(
        &app,
        with_json("POST", "/api/notes", json!({"title": "t", "folderId": "nope"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "The `folderId` is not valid"
    );

    let response = send(
        &app,
        with_json("POST", "/api/notes", json!({"title": "t", "tags": ["nope"]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "The `tags` array contains an invalid `id`"
    );

    let response = send(
        &app,
        with_json("POST", "/api/notes", json!({"title": "t", "tags": "nope"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "The `tags` property must be an array"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_note_with_unknown_folder_is_400() {
    let (app, db) = seeded_app().await;

    let response = send(
        &app,
        with_json(
            "POST",
            "/api/notes",
            json!({"title": "t", "folderId": "AAAAAAAAAAAAAAAAAAAAAAAA"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "A referenced folder or tag does not exist"
    );
    assert_eq!(db.notes().count().await.unwrap(), seed::notes().len());
}

// =============================================================================
// PUT /api/notes/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_note_changes_provided_fields() {
    let (app, _db) = seeded_app().await;
    let note = &seed::notes()[0];

    let response = send(
        &app,
        with_json(
            "PUT",
            &format!("/api/notes/{}", note.id),
            json!({"title": "Updated", "folderId": ""}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["title"], "Updated");
    assert_eq!(body["content"], note.content.clone().unwrap());
    assert!(body["folderId"].is_null());
    assert_eq!(body["tags"].as_array().unwrap().len(), note.tags.len());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_note_checks_title_then_id() {
    let (app, _db) = seeded_app().await;

    let response = send(&app, with_json("PUT", "/api/notes/99-99-99", json!({}))).await;
    assert_eq!(
        json_body(response).await["message"],
        "Missing `title` in request body"
    );

    let response = send(
        &app,
        with_json("PUT", "/api/notes/99-99-99", json!({"title": "t"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "The `id` is not valid");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_note_is_404() {
    let (app, _db) = seeded_app().await;

    let response = send(
        &app,
        with_json(
            "PUT",
            "/api/notes/AAAAAAAAAAAAAAAAAAAAAAAA",
            json!({"title": "t"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// DELETE /api/notes/{id} and cascades
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_note_is_idempotent() {
    let (app, db) = seeded_app().await;
    let uri = format!("/api/notes/{}", seed::notes()[4].id);

    assert_eq!(send(&app, delete(&uri)).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, delete(&uri)).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(db.notes().count().await.unwrap(), seed::notes().len() - 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_tag_removes_it_from_notes() {
    let (app, _db) = seeded_app().await;
    let tag = seed::tags()[1].id;

    let response = send(&app, delete(&format!("/api/tags/{}", tag))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json_body(send(&app, get(&format!("/api/notes?tagId={}", tag))).await).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_folder_unfiles_its_notes() {
    let (app, _db) = seeded_app().await;
    let folder = seed::folders()[3].id;
    let note = seed::notes()[3].id;

    let response = send(&app, delete(&format!("/api/folders/{}", folder))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json_body(send(&app, get(&format!("/api/notes/{}", note))).await).await;
    assert!(body["folderId"].is_null());
}
