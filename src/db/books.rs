//! Record operations for the books table: parameterized insert, fetch-all,
//! and delete by id or exact title. There is intentionally no update
//! operation; fixing a record means deleting and re-adding it.

use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use super::error::{blank_to_null, StoreError};
use crate::models::Book;

/// Selector for the book delete operation. Making the two modes a closed enum
/// keeps "delete by id" and "delete by title" mutually exclusive at the type
/// level instead of branching on a free-form mode string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookDeleteKey {
    ById(i64),
    ByTitle(String),
}

impl BookDeleteKey {
    /// Human-readable form of the selector for error messages.
    fn describe(&self) -> String {
        match self {
            BookDeleteKey::ById(id) => format!("id {id}"),
            BookDeleteKey::ByTitle(title) => format!("title \"{title}\""),
        }
    }
}

/// Insert a new book and return its generated id. Title and author are
/// required and validated before any SQL runs; blank optional fields are
/// stored as NULL. `date_added` comes from the column default, so it is not
/// part of the statement.
pub fn insert_book(
    conn: &Connection,
    title: &str,
    author: &str,
    genre: Option<&str>,
    published_year: Option<i64>,
    isbn: Option<&str>,
) -> Result<i64, StoreError> {
    let title = StoreError::require(title, "Book title")?;
    let author = StoreError::require(author, "Book author")?;

    conn.execute(
        "INSERT INTO books (title, author, genre, published_year, isbn)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            title,
            author,
            blank_to_null(genre),
            published_year,
            blank_to_null(isbn)
        ],
    )
    .map_err(|source| StoreError::query("failed to insert book", source))?;

    Ok(conn.last_insert_rowid())
}

/// Retrieve every book in insertion order. An empty table is an empty list,
/// never an error.
pub fn fetch_all_books(conn: &Connection) -> Result<Vec<Book>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, genre, published_year, isbn, date_added
             FROM books ORDER BY id",
        )
        .map_err(|source| StoreError::query("failed to prepare book query", source))?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                genre: row.get(3)?,
                published_year: row.get(4)?,
                isbn: row.get(5)?,
                date_added: row.get(6)?,
            })
        })
        .map_err(|source| StoreError::query("failed to load books", source))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StoreError::query("failed to collect books", source))?;

    Ok(books)
}

/// Delete book rows matching the selector and return how many were removed.
/// Titles are not unique, so `ByTitle` removes every row with that exact
/// title. Zero matches is an error so the UI can tell the librarian nothing
/// happened. A book still referenced by borrow records cannot be deleted.
pub fn delete_book(conn: &Connection, key: BookDeleteKey) -> Result<usize, StoreError> {
    let deleted = match &key {
        BookDeleteKey::ById(id) => {
            conn.execute("DELETE FROM books WHERE id = ?1", params![id])
        }
        BookDeleteKey::ByTitle(title) => {
            conn.execute("DELETE FROM books WHERE title = ?1", params![title])
        }
    }
    .map_err(map_referenced_delete)?;

    if deleted == 0 {
        Err(StoreError::NotFound {
            entity: "book",
            selector: key.describe(),
        })
    } else {
        Ok(deleted)
    }
}

/// Coerce the foreign-key failure raised when deleting a book that borrow
/// records still point at into a message the librarian can act on.
fn map_referenced_delete(err: SqlError) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::Constraint {
            message: "book is still referenced by borrow records".to_string(),
            source: err,
        }
    } else {
        StoreError::query("failed to delete book", err)
    }
}

#[cfg(test)]
mod tests {
    use super::super::connection::tests::open_test_store;
    use super::*;

    #[test]
    fn insert_and_fetch_round_trip() {
        let conn = open_test_store();

        let id = insert_book(
            &conn,
            "Dune",
            "Herbert",
            Some("SF"),
            Some(1965),
            Some("0441013597"),
        )
        .expect("insert book");
        assert!(id > 0);

        let books = fetch_all_books(&conn).expect("fetch books");
        assert_eq!(books.len(), 1);

        let book = &books[0];
        assert_eq!(book.id, id);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.genre.as_deref(), Some("SF"));
        assert_eq!(book.published_year, Some(1965));
        assert_eq!(book.isbn.as_deref(), Some("0441013597"));
        assert!(!book.date_added.is_empty());
    }

    #[test]
    fn fetch_on_empty_table_returns_empty_list() {
        let conn = open_test_store();
        let books = fetch_all_books(&conn).expect("fetch books");
        assert!(books.is_empty());
    }

    #[test]
    fn blank_optionals_are_stored_as_null() {
        let conn = open_test_store();
        insert_book(&conn, "Dune", "Herbert", Some(""), None, Some("  "))
            .expect("insert book");

        let books = fetch_all_books(&conn).expect("fetch books");
        assert_eq!(books[0].genre, None);
        assert_eq!(books[0].published_year, None);
        assert_eq!(books[0].isbn, None);
    }

    #[test]
    fn insert_requires_title_and_author() {
        let conn = open_test_store();

        let err = insert_book(&conn, "", "Herbert", None, None, None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = insert_book(&conn, "Dune", "   ", None, None, None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert!(fetch_all_books(&conn).expect("fetch books").is_empty());
    }

    #[test]
    fn delete_by_id_removes_exactly_one_row() {
        let conn = open_test_store();
        let first = insert_book(&conn, "Dune", "Herbert", None, None, None).unwrap();
        let second = insert_book(&conn, "Hyperion", "Simmons", None, None, None).unwrap();
        let third = insert_book(&conn, "Neuromancer", "Gibson", None, None, None).unwrap();

        let removed = delete_book(&conn, BookDeleteKey::ById(second)).expect("delete book");
        assert_eq!(removed, 1);

        let remaining = fetch_all_books(&conn).expect("fetch books");
        let ids: Vec<i64> = remaining.iter().map(|book| book.id).collect();
        assert_eq!(ids, [first, third]);
        assert_eq!(remaining[0].title, "Dune");
        assert_eq!(remaining[1].title, "Neuromancer");
    }

    #[test]
    fn delete_by_title_removes_every_match() {
        let conn = open_test_store();
        insert_book(&conn, "Dune", "Herbert", None, None, None).unwrap();
        insert_book(&conn, "Dune", "Herbert", None, Some(1965), None).unwrap();
        insert_book(&conn, "Hyperion", "Simmons", None, None, None).unwrap();

        let removed =
            delete_book(&conn, BookDeleteKey::ByTitle("Dune".to_string())).expect("delete books");
        assert_eq!(removed, 2);

        let remaining = fetch_all_books(&conn).expect("fetch books");
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|book| book.title != "Dune"));
    }

    #[test]
    fn delete_with_no_match_reports_not_found() {
        let conn = open_test_store();
        let err = delete_book(&conn, BookDeleteKey::ById(42)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
