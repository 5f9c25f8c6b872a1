//! Domain models for the Noteful store.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

use super::ObjectId;

/// A record identified by a unique, non-empty `name`.
///
/// Tags and folders share this shape and every store operation on them.
pub trait Named: Sized + Send + Sync + Unpin + 'static {
    /// Singular entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Backing collection (table) name.
    const COLLECTION: &'static str;

    fn from_parts(id: ObjectId, name: String) -> Self;

    fn id(&self) -> ObjectId;

    fn name(&self) -> &str;
}

/// A label attached to notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ObjectId,
    pub name: String,
}

impl Named for Tag {
    const ENTITY: &'static str = "tag";
    const COLLECTION: &'static str = "tag";

    fn from_parts(id: ObjectId, name: String) -> Self {
        Self { id, name }
    }

    fn id(&self) -> ObjectId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A folder grouping notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: ObjectId,
    pub name: String,
}

impl Named for Folder {
    const ENTITY: &'static str = "folder";
    const COLLECTION: &'static str = "folder";

    fn from_parts(id: ObjectId, name: String) -> Self {
        Self { id, name }
    }

    fn id(&self) -> ObjectId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A note, optionally filed in a folder and labelled with tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: ObjectId,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<ObjectId>,
    /// Tag ids in insertion order.
    pub tags: Vec<ObjectId>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for inserting a note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<ObjectId>,
    pub tags: Vec<ObjectId>,
}

/// Partial update for a note. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: String,
    pub content: Option<String>,
    /// `Some(None)` clears the folder.
    pub folder_id: Option<Option<ObjectId>>,
    pub tags: Option<Vec<ObjectId>>,
}

/// Filters for listing notes. All filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive substring of title or content.
    pub search_term: Option<String>,
    pub folder_id: Option<ObjectId>,
    pub tag_id: Option<ObjectId>,
}
