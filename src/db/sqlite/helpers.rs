//! Shared helper functions for SQLite repositories.

use chrono::{SecondsFormat, Utc};

use crate::db::{DbError, ObjectId};

/// Translate a driver error, recognising constraint violations.
///
/// `key` names the value that would collide on a unique index.
pub fn map_sqlx_error(entity_type: &str, key: &str, e: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DbError::DuplicateKey {
                entity_type: entity_type.to_string(),
                key: key.to_string(),
            };
        }
        if db_err.is_foreign_key_violation() {
            return DbError::ForeignKey {
                message: db_err.message().to_string(),
            };
        }
    }

    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => DbError::Connection {
            message: e.to_string(),
        },
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Shorthand for errors on statements that cannot violate a constraint.
pub fn db_error(e: sqlx::Error) -> DbError {
    map_sqlx_error("", "", e)
}

/// Parse an id read back from a row.
pub fn stored_id(raw: &str) -> Result<ObjectId, DbError> {
    ObjectId::parse(raw).map_err(|e| DbError::InvalidData {
        message: e.to_string(),
        help: "Stored ids must be 24 hex characters".to_string(),
    })
}

/// Current UTC time, millisecond precision, lexically sortable.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping wildcards with `\`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("dogs"), "%dogs%");
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn stored_id_rejects_garbage() {
        assert!(matches!(
            stored_id("not-an-id"),
            Err(DbError::InvalidData { .. })
        ));
    }

    #[test]
    fn timestamps_sort_lexically() {
        let a = current_timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = current_timestamp();
        assert!(a < b);
        assert!(a.ends_with('Z'));
    }

    #[test]
    fn pool_closed_maps_to_connection_error() {
        let err = map_sqlx_error("tag", "foo", sqlx::Error::PoolClosed);
        assert!(matches!(err, DbError::Connection { .. }));
    }
}
