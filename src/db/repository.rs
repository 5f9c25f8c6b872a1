//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic. The
//! method names follow document-store conventions: lookups that may miss
//! return `Option` rather than an error.

use std::future::Future;

use crate::db::{
    DbResult, ObjectId,
    models::{Folder, Named, NewNote, Note, NoteQuery, NoteUpdate, Tag},
};

/// Repository for a collection of uniquely named records (tags, folders).
pub trait NamedRepository: Send + Sync {
    type Record: Named;

    /// All records sorted by name, ascending.
    fn find(&self) -> impl Future<Output = DbResult<Vec<Self::Record>>> + Send;

    /// Get a record by ID.
    fn find_by_id(&self, id: ObjectId)
    -> impl Future<Output = DbResult<Option<Self::Record>>> + Send;

    /// Insert a record with a freshly assigned ID.
    ///
    /// Fails with `DbError::DuplicateKey` if the name is taken.
    fn create(&self, name: &str) -> impl Future<Output = DbResult<Self::Record>> + Send;

    /// Rename a record, returning the updated record if it exists.
    fn find_by_id_and_update(
        &self,
        id: ObjectId,
        name: &str,
    ) -> impl Future<Output = DbResult<Option<Self::Record>>> + Send;

    /// Delete a record, returning it if it existed.
    fn find_by_id_and_remove(
        &self,
        id: ObjectId,
    ) -> impl Future<Output = DbResult<Option<Self::Record>>> + Send;

    /// Insert records with their IDs preserved, all or nothing.
    fn insert_many(&self, records: &[Self::Record])
    -> impl Future<Output = DbResult<usize>> + Send;

    /// Number of records in the collection.
    fn count(&self) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Repository for Note operations.
pub trait NoteRepository: Send + Sync {
    /// Notes matching `query`, most recently updated first.
    fn find(&self, query: &NoteQuery) -> impl Future<Output = DbResult<Vec<Note>>> + Send;

    /// Get a note by ID.
    fn find_by_id(&self, id: ObjectId) -> impl Future<Output = DbResult<Option<Note>>> + Send;

    /// Insert a note with a freshly assigned ID.
    fn create(&self, note: &NewNote) -> impl Future<Output = DbResult<Note>> + Send;

    /// Apply `update`, returning the updated note if it exists.
    fn find_by_id_and_update(
        &self,
        id: ObjectId,
        update: &NoteUpdate,
    ) -> impl Future<Output = DbResult<Option<Note>>> + Send;

    /// Delete a note, returning it if it existed.
    fn find_by_id_and_remove(
        &self,
        id: ObjectId,
    ) -> impl Future<Output = DbResult<Option<Note>>> + Send;

    /// Insert notes with their IDs and timestamps preserved, all or nothing.
    fn insert_many(&self, notes: &[Note]) -> impl Future<Output = DbResult<usize>> + Send;

    /// Number of notes.
    fn count(&self) -> impl Future<Output = DbResult<usize>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Tags: NamedRepository<Record = Tag>;
    type Folders: NamedRepository<Record = Folder>;
    type Notes: NoteRepository;

    /// Run pending migrations, creating collections and indexes.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the tag repository.
    fn tags(&self) -> Self::Tags;

    /// Get the folder repository.
    fn folders(&self) -> Self::Folders;

    /// Get the note repository.
    fn notes(&self) -> Self::Notes;
}
