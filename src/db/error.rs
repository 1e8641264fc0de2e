//! Typed failure taxonomy for the persistence layer. Every store function
//! returns `Result<_, StoreError>` so the UI can report precisely what went
//! wrong instead of crashing on an unhandled database error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the catalog store. The first three variants are fatal
/// at startup; the rest are per-operation and leave the process running.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The application data directory could not be created.
    #[error("failed to create data directory {}: {source}", .path.display())]
    DataDir { path: PathBuf, source: io::Error },

    /// The user's home directory could not be located, so there is nowhere
    /// to put the database file.
    #[error("could not locate home directory")]
    NoHomeDir,

    /// The SQLite database file could not be opened or initialized.
    #[error("failed to open catalog database {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// DDL for one of the catalog tables failed.
    #[error("failed to create {table} table: {source}")]
    Schema {
        table: &'static str,
        source: rusqlite::Error,
    },

    /// A statement violated a referential constraint, e.g. a borrow record
    /// naming a book or member id that does not exist.
    #[error("{message}")]
    Constraint {
        message: String,
        source: rusqlite::Error,
    },

    /// A required field was blank. Checked before any SQL is built.
    #[error("{0}")]
    Validation(String),

    /// A delete selector matched no rows.
    #[error("no {entity} matched {selector}")]
    NotFound {
        entity: &'static str,
        selector: String,
    },

    /// Any other SQLite failure, wrapped with the operation that hit it.
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        source: rusqlite::Error,
    },
}

impl StoreError {
    /// Shorthand used by the store modules to wrap a plain SQLite error with
    /// the operation it came from.
    pub(crate) fn query(context: &'static str, source: rusqlite::Error) -> Self {
        StoreError::Query { context, source }
    }

    /// Reject blank required input with a descriptive message. Whitespace-only
    /// values count as missing.
    pub(crate) fn require<'a>(value: &'a str, label: &str) -> Result<&'a str, StoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(StoreError::Validation(format!("{label} is required")))
        } else {
            Ok(trimmed)
        }
    }
}

/// Normalize optional text input: blank entries are stored as NULL so fetched
/// rows model absence as `None` instead of an empty string.
pub(crate) fn blank_to_null(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_whitespace_only_input() {
        let err = StoreError::require("   ", "Book title").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "Book title is required");
    }

    #[test]
    fn require_trims_surrounding_whitespace() {
        let value = StoreError::require("  Dune ", "Book title").unwrap();
        assert_eq!(value, "Dune");
    }

    #[test]
    fn blank_optionals_become_null() {
        assert_eq!(blank_to_null(Some("")), None);
        assert_eq!(blank_to_null(Some("  ")), None);
        assert_eq!(blank_to_null(None), None);
        assert_eq!(blank_to_null(Some(" SF ")), Some("SF"));
    }
}
