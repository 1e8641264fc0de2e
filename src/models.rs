//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These stay light-weight data holders so the persistence and
//! presentation layers can focus on their own logic. Optional columns are
//! `Option` so a row fetched back distinguishes "never entered" from an
//! actual value.

/// A catalogued book. Rows are immutable after insert; the only amendment
/// path is delete-and-reinsert.
#[derive(Debug, Clone)]
pub struct Book {
    /// Primary key from the database. Kept around even when the UI only needs
    /// display information because delete flows bubble the id back to the
    /// persistence layer.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub published_year: Option<i64>,
    pub isbn: Option<String>,
    /// Set by the database at insert time (`CURRENT_TIMESTAMP`), never by the
    /// caller.
    pub date_added: String,
}

/// A registered library member.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    /// Database-generated join timestamp.
    pub date_joined: String,
}

/// One borrow transaction linking a book to a member. `return_date` exists in
/// the schema but no operation ever populates it, so records are never marked
/// returned.
#[derive(Debug, Clone)]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
}
