//! Record operations for the borrow_records table. Inserts are where the
//! schema's foreign keys bite: a record naming a book or member id that does
//! not exist is rejected by the database and surfaced as a typed constraint
//! error. `return_date` is part of the schema but no operation writes it.

use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use super::error::StoreError;
use crate::models::BorrowRecord;

/// Selector for the borrow-record delete operation. `ByBookId` removes every
/// record for that book, which is how a book's whole lending history is
/// cleared before the book itself can be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowRecordDeleteKey {
    ById(i64),
    ByBookId(i64),
}

impl BorrowRecordDeleteKey {
    fn describe(&self) -> String {
        match self {
            BorrowRecordDeleteKey::ById(id) => format!("id {id}"),
            BorrowRecordDeleteKey::ByBookId(book_id) => format!("book id {book_id}"),
        }
    }
}

/// Insert a new borrow record and return its generated id. Both dates are
/// required; the referenced book and member must already exist or the insert
/// fails with a constraint error and writes nothing.
pub fn insert_borrow_record(
    conn: &Connection,
    book_id: i64,
    member_id: i64,
    borrow_date: &str,
    due_date: &str,
) -> Result<i64, StoreError> {
    let borrow_date = StoreError::require(borrow_date, "Borrow date")?;
    let due_date = StoreError::require(due_date, "Due date")?;

    conn.execute(
        "INSERT INTO borrow_records (book_id, member_id, borrow_date, due_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![book_id, member_id, borrow_date, due_date],
    )
    .map_err(map_missing_reference)?;

    Ok(conn.last_insert_rowid())
}

/// Retrieve every borrow record in insertion order.
pub fn fetch_all_borrow_records(conn: &Connection) -> Result<Vec<BorrowRecord>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, book_id, member_id, borrow_date, due_date, return_date
             FROM borrow_records ORDER BY id",
        )
        .map_err(|source| StoreError::query("failed to prepare borrow record query", source))?;

    let records = stmt
        .query_map([], |row| {
            Ok(BorrowRecord {
                id: row.get(0)?,
                book_id: row.get(1)?,
                member_id: row.get(2)?,
                borrow_date: row.get(3)?,
                due_date: row.get(4)?,
                return_date: row.get(5)?,
            })
        })
        .map_err(|source| StoreError::query("failed to load borrow records", source))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StoreError::query("failed to collect borrow records", source))?;

    Ok(records)
}

/// Delete borrow-record rows matching the selector and return how many were
/// removed. `ByBookId` removes every record for that book in one statement.
pub fn delete_borrow_record(
    conn: &Connection,
    key: BorrowRecordDeleteKey,
) -> Result<usize, StoreError> {
    let deleted = match &key {
        BorrowRecordDeleteKey::ById(id) => {
            conn.execute("DELETE FROM borrow_records WHERE id = ?1", params![id])
        }
        BorrowRecordDeleteKey::ByBookId(book_id) => conn.execute(
            "DELETE FROM borrow_records WHERE book_id = ?1",
            params![book_id],
        ),
    }
    .map_err(|source| StoreError::query("failed to delete borrow record", source))?;

    if deleted == 0 {
        Err(StoreError::NotFound {
            entity: "borrow record",
            selector: key.describe(),
        })
    } else {
        Ok(deleted)
    }
}

/// Coerce a foreign-key violation into a message naming the real problem: the
/// record points at a book or member that is not in the catalog.
fn map_missing_reference(err: SqlError) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::Constraint {
            message: "borrow record references a book or member that does not exist".to_string(),
            source: err,
        }
    } else {
        StoreError::query("failed to insert borrow record", err)
    }
}

#[cfg(test)]
mod tests {
    use super::super::books::{delete_book, insert_book, BookDeleteKey};
    use super::super::connection::tests::open_test_store;
    use super::super::members::insert_member;
    use super::*;

    fn seed_book_and_member(conn: &Connection) -> (i64, i64) {
        let book_id = insert_book(conn, "Dune", "Herbert", None, None, None).unwrap();
        let member_id = insert_member(conn, "Alice", None, None, None).unwrap();
        (book_id, member_id)
    }

    #[test]
    fn insert_and_fetch_round_trip() {
        let conn = open_test_store();
        let (book_id, member_id) = seed_book_and_member(&conn);

        let id = insert_borrow_record(&conn, book_id, member_id, "2024-03-01", "2024-03-15")
            .expect("insert borrow record");
        assert!(id > 0);

        let records = fetch_all_borrow_records(&conn).expect("fetch borrow records");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id, id);
        assert_eq!(record.book_id, book_id);
        assert_eq!(record.member_id, member_id);
        assert_eq!(record.borrow_date, "2024-03-01");
        assert_eq!(record.due_date, "2024-03-15");
        // No operation ever marks a record returned.
        assert_eq!(record.return_date, None);
    }

    #[test]
    fn insert_with_unknown_book_fails_and_writes_nothing() {
        let conn = open_test_store();
        let (_, member_id) = seed_book_and_member(&conn);

        let err =
            insert_borrow_record(&conn, 999, member_id, "2024-03-01", "2024-03-15").unwrap_err();
        assert!(matches!(err, StoreError::Constraint { .. }));

        let records = fetch_all_borrow_records(&conn).expect("fetch borrow records");
        assert!(records.is_empty());
    }

    #[test]
    fn insert_with_unknown_member_fails() {
        let conn = open_test_store();
        let (book_id, _) = seed_book_and_member(&conn);

        let err =
            insert_borrow_record(&conn, book_id, 999, "2024-03-01", "2024-03-15").unwrap_err();
        assert!(matches!(err, StoreError::Constraint { .. }));
    }

    #[test]
    fn insert_requires_both_dates() {
        let conn = open_test_store();
        let (book_id, member_id) = seed_book_and_member(&conn);

        let err = insert_borrow_record(&conn, book_id, member_id, "", "2024-03-15").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = insert_borrow_record(&conn, book_id, member_id, "2024-03-01", "  ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn delete_by_book_id_removes_every_record_for_that_book() {
        let conn = open_test_store();
        let (book_id, member_id) = seed_book_and_member(&conn);
        let other_book = insert_book(&conn, "Hyperion", "Simmons", None, None, None).unwrap();

        insert_borrow_record(&conn, book_id, member_id, "2024-01-01", "2024-01-15").unwrap();
        insert_borrow_record(&conn, book_id, member_id, "2024-02-01", "2024-02-15").unwrap();
        let kept =
            insert_borrow_record(&conn, other_book, member_id, "2024-03-01", "2024-03-15").unwrap();

        let removed = delete_borrow_record(&conn, BorrowRecordDeleteKey::ByBookId(book_id))
            .expect("delete borrow records");
        assert_eq!(removed, 2);

        let remaining = fetch_all_borrow_records(&conn).expect("fetch borrow records");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept);
    }

    #[test]
    fn delete_by_id_removes_exactly_one_row() {
        let conn = open_test_store();
        let (book_id, member_id) = seed_book_and_member(&conn);

        let first =
            insert_borrow_record(&conn, book_id, member_id, "2024-01-01", "2024-01-15").unwrap();
        let second =
            insert_borrow_record(&conn, book_id, member_id, "2024-02-01", "2024-02-15").unwrap();

        delete_borrow_record(&conn, BorrowRecordDeleteKey::ById(first))
            .expect("delete borrow record");

        let remaining = fetch_all_borrow_records(&conn).expect("fetch borrow records");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[test]
    fn delete_with_no_match_reports_not_found() {
        let conn = open_test_store();
        let err = delete_borrow_record(&conn, BorrowRecordDeleteKey::ById(7)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn referenced_book_cannot_be_deleted_until_records_are_cleared() {
        let conn = open_test_store();
        let (book_id, member_id) = seed_book_and_member(&conn);
        insert_borrow_record(&conn, book_id, member_id, "2024-01-01", "2024-01-15").unwrap();

        let err = delete_book(&conn, BookDeleteKey::ById(book_id)).unwrap_err();
        assert!(matches!(err, StoreError::Constraint { .. }));

        delete_borrow_record(&conn, BorrowRecordDeleteKey::ByBookId(book_id))
            .expect("clear borrow records");
        delete_book(&conn, BookDeleteKey::ById(book_id)).expect("delete book");
    }
}
