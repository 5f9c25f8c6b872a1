//! Fixed seed data for development databases and tests.
//!
//! Folder ids are `1111…11xx`, tag ids `2222…22xx`, note ids `0000…00xx`.

use crate::db::{
    Database, DbResult, Folder, NamedRepository, Note, NoteRepository, ObjectId, Tag,
};

/// Record counts inserted by [`load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub folders: usize,
    pub tags: usize,
    pub notes: usize,
}

const fn seed_id(fill: u8, n: u8) -> ObjectId {
    let mut bytes = [fill; 12];
    bytes[11] = n;
    ObjectId::from_bytes(bytes)
}

pub fn folders() -> Vec<Folder> {
    ["Archive", "Drafts", "Personal", "Work"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Folder {
            id: seed_id(0x11, i as u8),
            name: name.to_string(),
        })
        .collect()
}

pub fn tags() -> Vec<Tag> {
    ["foo", "bar", "baz", "qux"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Tag {
            id: seed_id(0x22, i as u8),
            name: name.to_string(),
        })
        .collect()
}

pub fn notes() -> Vec<Note> {
    let note = |n: u8, title: &str, content: &str, folder: Option<u8>, tags: &[u8]| Note {
        id: seed_id(0x00, n),
        title: title.to_string(),
        content: Some(content.to_string()),
        folder_id: folder.map(|f| seed_id(0x11, f)),
        tags: tags.iter().map(|&t| seed_id(0x22, t)).collect(),
        created_at: format!("2025-01-0{}T00:00:00.000Z", n + 1),
        updated_at: format!("2025-01-0{}T00:00:00.000Z", n + 1),
    };

    vec![
        note(0, "5 life lessons learned from cats", "Lorem ipsum dolor sit amet.", Some(0), &[0]),
        note(1, "What the government doesn't want you to know about cats", "Posuere sollicitudin aliquam.", Some(1), &[0, 1]),
        note(2, "The most boring article about cats you'll ever read", "Lorem ipsum dolor sit amet.", Some(2), &[2]),
        note(3, "7 things lady gaga has in common with cats", "Posuere sollicitudin aliquam.", Some(3), &[]),
        note(4, "The most incredible article about cats you'll ever read", "Lorem ipsum dolor sit amet.", None, &[1, 3]),
    ]
}

/// Insert every seed collection. Folders and tags go first so note
/// references resolve.
pub async fn load<D: Database>(db: &D) -> DbResult<SeedCounts> {
    let folders = db.folders().insert_many(&folders()).await?;
    let tags = db.tags().insert_many(&tags()).await?;
    let notes = db.notes().insert_many(&notes()).await?;

    tracing::info!(folders, tags, notes, "seed data loaded");
    Ok(SeedCounts {
        folders,
        tags,
        notes,
    })
}
