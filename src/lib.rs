//! Noteful: a JSON REST service for notes, folders and tags.

pub mod api;
pub mod db;
pub mod paths;
