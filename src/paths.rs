//! Path resolution for noteful data files.
//!
//! Follows the XDG base directory layout.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "noteful";
const DB_FILE: &str = "noteful.db";

/// Get XDG-compliant data directory for noteful.
///
/// # Returns
/// `$XDG_DATA_HOME/noteful`, else `~/.local/share/noteful`. Relative to the
/// working directory when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(env::var("XDG_DATA_HOME").ok(), env::var("HOME").ok())
}

/// Get database file path (data_dir/noteful.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join(DB_FILE)
}

fn resolve_data_dir(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    let data_home = match (xdg_data_home.filter(|s| !s.is_empty()), home) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".local/share"),
        (None, None) => PathBuf::from(".local/share"),
    };

    data_home.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xdg_data_home_wins() {
        let path = resolve_data_dir(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(path, PathBuf::from("/xdg/noteful"));
    }

    #[test]
    fn test_empty_xdg_falls_back_to_home() {
        let path = resolve_data_dir(Some(String::new()), Some("/home/u".into()));
        assert_eq!(path, PathBuf::from("/home/u/.local/share/noteful"));
    }

    #[test]
    fn test_no_env_is_relative() {
        assert_eq!(resolve_data_dir(None, None), PathBuf::from(".local/share/noteful"));
    }

    #[test]
    fn test_get_db_path_ends_with_noteful_db() {
        // env vars are unreliable in parallel tests
        assert!(get_db_path().ends_with("noteful/noteful.db"));
    }
}
