//! View state for the tabular record screens. Each section renders the same
//! way: fixed headers in schema order, one stringified row per record, and a
//! scroll offset. The state lives in one struct and per-entity builders turn
//! fetched rows into display cells.

use crate::models::{Book, BorrowRecord, Member};

/// Placeholder shown for NULL columns so empty cells stay visually distinct
/// from blank strings.
const EMPTY_CELL: &str = "-";

/// A scrollable table of already-stringified records.
pub(crate) struct RecordTable {
    pub(crate) headers: &'static [&'static str],
    /// Column widths in terminal cells, index-matched to `headers`.
    pub(crate) widths: &'static [u16],
    pub(crate) rows: Vec<Vec<String>>,
    pub(crate) scroll: usize,
}

impl RecordTable {
    fn new(headers: &'static [&'static str], widths: &'static [u16], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            widths,
            rows,
            scroll: 0,
        }
    }

    /// Scroll by a signed number of rows, clamped to the table contents.
    pub(crate) fn scroll_by(&mut self, delta: isize) {
        let max = self.rows.len().saturating_sub(1);
        let next = self.scroll as isize + delta;
        self.scroll = next.clamp(0, max as isize) as usize;
    }

    /// Replace the contents after a refresh, keeping the scroll position in
    /// bounds.
    pub(crate) fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        let max = self.rows.len().saturating_sub(1);
        self.scroll = self.scroll.min(max);
    }
}

fn opt_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Build the books table: headers follow the schema column order.
pub(crate) fn books_table(books: &[Book]) -> RecordTable {
    let rows = books
        .iter()
        .map(|book| {
            vec![
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                opt_cell(&book.genre),
                book.published_year
                    .map(|year| year.to_string())
                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
                opt_cell(&book.isbn),
                book.date_added.clone(),
            ]
        })
        .collect();

    RecordTable::new(
        &["ID", "Title", "Author", "Genre", "Published Year", "ISBN", "Date Added"],
        &[5, 26, 20, 12, 14, 14, 19],
        rows,
    )
}

/// Build the members table.
pub(crate) fn members_table(members: &[Member]) -> RecordTable {
    let rows = members
        .iter()
        .map(|member| {
            vec![
                member.id.to_string(),
                member.name.clone(),
                opt_cell(&member.email),
                opt_cell(&member.contact_number),
                opt_cell(&member.address),
                member.date_joined.clone(),
            ]
        })
        .collect();

    RecordTable::new(
        &["ID", "Name", "Email", "Contact Number", "Address", "Date Joined"],
        &[5, 22, 24, 14, 26, 19],
        rows,
    )
}

/// Build the borrow-records table. `return_date` stays in the view even
/// though nothing populates it, mirroring the schema.
pub(crate) fn borrow_records_table(records: &[BorrowRecord]) -> RecordTable {
    let rows = records
        .iter()
        .map(|record| {
            vec![
                record.id.to_string(),
                record.book_id.to_string(),
                record.member_id.to_string(),
                record.borrow_date.clone(),
                record.due_date.clone(),
                opt_cell(&record.return_date),
            ]
        })
        .collect();

    RecordTable::new(
        &["ID", "Book ID", "Member ID", "Borrow Date", "Due Date", "Return Date"],
        &[5, 8, 10, 12, 12, 12],
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_books() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                genre: None,
                published_year: Some(1965),
                isbn: None,
                date_added: "2024-01-01 10:00:00".to_string(),
            },
            Book {
                id: 2,
                title: "Hyperion".to_string(),
                author: "Simmons".to_string(),
                genre: Some("SF".to_string()),
                published_year: None,
                isbn: Some("0553283685".to_string()),
                date_added: "2024-01-02 10:00:00".to_string(),
            },
        ]
    }

    #[test]
    fn books_table_stringifies_null_columns() {
        let table = books_table(&sample_books());
        assert_eq!(table.headers.len(), table.widths.len());
        assert_eq!(table.rows[0][3], "-");
        assert_eq!(table.rows[0][4], "1965");
        assert_eq!(table.rows[1][4], "-");
        assert_eq!(table.rows[1][5], "0553283685");
    }

    #[test]
    fn scroll_is_clamped_to_contents() {
        let mut table = books_table(&sample_books());
        table.scroll_by(-3);
        assert_eq!(table.scroll, 0);
        table.scroll_by(10);
        assert_eq!(table.scroll, 1);

        table.set_rows(Vec::new());
        assert_eq!(table.scroll, 0);
        table.scroll_by(1);
        assert_eq!(table.scroll, 0);
    }
}
