//! Persistence module split across logical submodules: connection bootstrap,
//! the typed error taxonomy, and one record-operations module per entity.

mod books;
mod borrow_records;
mod connection;
mod error;
mod members;

pub use books::{delete_book, fetch_all_books, insert_book, BookDeleteKey};
pub use borrow_records::{
    delete_borrow_record, fetch_all_borrow_records, insert_borrow_record, BorrowRecordDeleteKey,
};
pub use connection::{connect, ensure_schema, StoreConfig};
pub use error::StoreError;
pub use members::{delete_member, fetch_all_members, insert_member, MemberDeleteKey};
