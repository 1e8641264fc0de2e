//! Connection bootstrap for the embedded catalog store. `connect` lazily
//! creates the database (directory and file) the first time the tool runs;
//! `ensure_schema` lazily creates the three tables. Both are safe to repeat,
//! so startup never needs to distinguish a fresh install from an existing
//! one.

use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-catalog-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "librarydb.sqlite";

/// Static connection descriptor for the store. With an embedded database the
/// descriptor reduces to a location on disk: the data directory (defaulting
/// to a dot-folder in the user's home) and the database file name. Tests and
/// scripted imports can point the store elsewhere by overriding `data_dir`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the database file. `None` resolves to
    /// `~/.library-catalog-manager`.
    pub data_dir: Option<PathBuf>,
    /// Database file name inside `data_dir`.
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: DB_FILE_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolve the absolute path of the SQLite database file.
    fn db_path(&self) -> Result<PathBuf, StoreError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.join(&self.file_name)),
            None => {
                let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
                Ok(base_dirs
                    .home_dir()
                    .join(DATA_DIR_NAME)
                    .join(&self.file_name))
            }
        }
    }
}

/// Open a connection to the configured database, creating the data directory
/// and database file when they do not exist yet. Referential integrity is
/// opt-in per connection in SQLite, so this also turns on
/// `PRAGMA foreign_keys` before handing the connection out. Any failure here
/// is fatal to startup; there is no retry.
pub fn connect(config: &StoreConfig) -> Result<Connection, StoreError> {
    let db_path = config.db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(&db_path).map_err(|source| StoreError::Connection {
        path: db_path.clone(),
        source,
    })?;

    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(|source| StoreError::Connection {
            path: db_path,
            source,
        })?;

    Ok(conn)
}

/// Create the books, members, and borrow_records tables if they are absent.
/// `CREATE TABLE IF NOT EXISTS` keeps the call idempotent, so every startup
/// runs it unconditionally. `date_added`/`date_joined` default to
/// `CURRENT_TIMESTAMP` on the database side; callers never supply them.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT,
            published_year INTEGER,
            isbn TEXT,
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .map_err(|source| StoreError::Schema {
        table: "books",
        source,
    })?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            contact_number TEXT,
            address TEXT,
            date_joined TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .map_err(|source| StoreError::Schema {
        table: "members",
        source,
    })?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS borrow_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books(id),
            member_id INTEGER NOT NULL REFERENCES members(id),
            borrow_date TEXT NOT NULL,
            due_date TEXT NOT NULL,
            return_date TEXT
        )",
        [],
    )
    .map_err(|source| StoreError::Schema {
        table: "borrow_records",
        source,
    })?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh in-memory store with the same pragmas `connect` applies. Shared
    /// by the record-store test modules.
    pub(crate) fn open_test_store() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        conn.execute("PRAGMA foreign_keys = ON", [])
            .expect("enable foreign keys");
        ensure_schema(&conn).expect("create schema");
        conn
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        ensure_schema(&conn).expect("first ensure_schema");
        ensure_schema(&conn).expect("second ensure_schema");

        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .expect("prepare table listing");
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .expect("query table listing")
            .collect::<Result<Vec<_>, _>>()
            .expect("collect table names");

        assert_eq!(tables, ["books", "borrow_records", "members"]);
    }

    #[test]
    fn connect_creates_database_and_directory() {
        let root = tempfile::tempdir().expect("create temp dir");
        let config = StoreConfig {
            data_dir: Some(root.path().join("nested").join("data")),
            file_name: "librarydb.sqlite".to_string(),
        };

        let conn = connect(&config).expect("first connect");
        ensure_schema(&conn).expect("create schema");
        conn.execute(
            "INSERT INTO books (title, author) VALUES ('Dune', 'Herbert')",
            [],
        )
        .expect("seed one row");
        drop(conn);

        // Reconnecting must reuse the file created by the first call.
        let conn = connect(&config).expect("second connect");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .expect("count books");
        assert_eq!(count, 1);
    }
}
