//! Core library surface for the library catalog manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the persistence layer (schema bootstrap plus per-entity record
//! operations) and the interactive shell that drives it.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. `main.rs` uses these to
/// bring up the embedded SQLite store before handing the connection to the
/// UI; the remaining record operations are called through `db::` by the shell.
pub use db::{connect, ensure_schema, StoreConfig, StoreError};

/// The three domain types that other layers manipulate.
pub use models::{Book, BorrowRecord, Member};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
