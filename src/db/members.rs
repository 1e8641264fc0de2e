//! Record operations for the members table. Same shape as the book module:
//! insert, fetch-all, delete by id or exact name.

use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use super::error::{blank_to_null, StoreError};
use crate::models::Member;

/// Selector for the member delete operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDeleteKey {
    ById(i64),
    ByName(String),
}

impl MemberDeleteKey {
    fn describe(&self) -> String {
        match self {
            MemberDeleteKey::ById(id) => format!("id {id}"),
            MemberDeleteKey::ByName(name) => format!("name \"{name}\""),
        }
    }
}

/// Insert a new member and return its generated id. Only the name is
/// required; blank contact details are stored as NULL. `date_joined` comes
/// from the column default.
pub fn insert_member(
    conn: &Connection,
    name: &str,
    email: Option<&str>,
    contact_number: Option<&str>,
    address: Option<&str>,
) -> Result<i64, StoreError> {
    let name = StoreError::require(name, "Member name")?;

    conn.execute(
        "INSERT INTO members (name, email, contact_number, address)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            blank_to_null(email),
            blank_to_null(contact_number),
            blank_to_null(address)
        ],
    )
    .map_err(|source| StoreError::query("failed to insert member", source))?;

    Ok(conn.last_insert_rowid())
}

/// Retrieve every member in insertion order.
pub fn fetch_all_members(conn: &Connection) -> Result<Vec<Member>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, email, contact_number, address, date_joined
             FROM members ORDER BY id",
        )
        .map_err(|source| StoreError::query("failed to prepare member query", source))?;

    let members = stmt
        .query_map([], |row| {
            Ok(Member {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                contact_number: row.get(3)?,
                address: row.get(4)?,
                date_joined: row.get(5)?,
            })
        })
        .map_err(|source| StoreError::query("failed to load members", source))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StoreError::query("failed to collect members", source))?;

    Ok(members)
}

/// Delete member rows matching the selector and return how many were removed.
/// Names are not unique, so `ByName` removes every row with that exact name.
/// A member still referenced by borrow records cannot be deleted.
pub fn delete_member(conn: &Connection, key: MemberDeleteKey) -> Result<usize, StoreError> {
    let deleted = match &key {
        MemberDeleteKey::ById(id) => {
            conn.execute("DELETE FROM members WHERE id = ?1", params![id])
        }
        MemberDeleteKey::ByName(name) => {
            conn.execute("DELETE FROM members WHERE name = ?1", params![name])
        }
    }
    .map_err(map_referenced_delete)?;

    if deleted == 0 {
        Err(StoreError::NotFound {
            entity: "member",
            selector: key.describe(),
        })
    } else {
        Ok(deleted)
    }
}

fn map_referenced_delete(err: SqlError) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::Constraint {
            message: "member is still referenced by borrow records".to_string(),
            source: err,
        }
    } else {
        StoreError::query("failed to delete member", err)
    }
}

#[cfg(test)]
mod tests {
    use super::super::connection::tests::open_test_store;
    use super::*;

    #[test]
    fn insert_and_fetch_round_trip() {
        let conn = open_test_store();

        let id = insert_member(
            &conn,
            "Alice",
            Some("alice@example.com"),
            Some("555-0101"),
            Some("12 Elm St"),
        )
        .expect("insert member");
        assert!(id > 0);

        let members = fetch_all_members(&conn).expect("fetch members");
        assert_eq!(members.len(), 1);

        let member = &members[0];
        assert_eq!(member.id, id);
        assert_eq!(member.name, "Alice");
        assert_eq!(member.email.as_deref(), Some("alice@example.com"));
        assert_eq!(member.contact_number.as_deref(), Some("555-0101"));
        assert_eq!(member.address.as_deref(), Some("12 Elm St"));
        assert!(!member.date_joined.is_empty());
    }

    #[test]
    fn insert_requires_name() {
        let conn = open_test_store();
        let err = insert_member(&conn, "  ", None, None, None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(fetch_all_members(&conn).expect("fetch members").is_empty());
    }

    #[test]
    fn blank_contact_details_are_stored_as_null() {
        let conn = open_test_store();
        insert_member(&conn, "Alice", Some(""), None, Some(" ")).expect("insert member");

        let members = fetch_all_members(&conn).expect("fetch members");
        assert_eq!(members[0].email, None);
        assert_eq!(members[0].contact_number, None);
        assert_eq!(members[0].address, None);
    }

    #[test]
    fn delete_by_name_removes_every_match() {
        let conn = open_test_store();
        insert_member(&conn, "Alice", None, None, None).unwrap();
        insert_member(&conn, "Alice", Some("other@example.com"), None, None).unwrap();
        insert_member(&conn, "Bob", None, None, None).unwrap();

        let removed = delete_member(&conn, MemberDeleteKey::ByName("Alice".to_string()))
            .expect("delete members");
        assert_eq!(removed, 2);

        let remaining = fetch_all_members(&conn).expect("fetch members");
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|member| member.name != "Alice"));
    }

    #[test]
    fn delete_by_id_removes_exactly_one_row() {
        let conn = open_test_store();
        let first = insert_member(&conn, "Alice", None, None, None).unwrap();
        let second = insert_member(&conn, "Bob", None, None, None).unwrap();

        let removed = delete_member(&conn, MemberDeleteKey::ById(first)).expect("delete member");
        assert_eq!(removed, 1);

        let remaining = fetch_all_members(&conn).expect("fetch members");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[test]
    fn delete_with_no_match_reports_not_found() {
        let conn = open_test_store();
        let err = delete_member(&conn, MemberDeleteKey::ByName("Ghost".to_string())).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
