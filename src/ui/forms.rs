//! Modal form state for the three catalog sections. Each entry form mirrors
//! the columns a librarian can supply (generated ids and timestamps are
//! absent on purpose), enforces a per-field input mask while typing, and
//! turns its raw strings into typed values on submit. The delete forms pair a
//! two-way mode switch with a single value field, producing the closed
//! delete-key enums the store expects.

use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::db::{BookDeleteKey, BorrowRecordDeleteKey, MemberDeleteKey};

/// Render one labelled form line, highlighting the focused field. Blank
/// fields show a placeholder so the librarian can tell required inputs from
/// optional ones at a glance.
fn field_line(label: &str, value: &str, is_active: bool, required: bool) -> Line<'static> {
    let display = if value.is_empty() {
        if required { "<required>" } else { "<optional>" }.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Cursor column for a focused field: past the label prefix plus the typed
/// characters.
fn cursor_x(label: &str, value: &str) -> u16 {
    (label.len() + 2 + value.chars().count()) as u16
}

/// True when the string already looks like an ISO `YYYY-MM-DD` date. The
/// input mask only admits digits and dashes, so this is a shape check, not a
/// calendar check.
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Fields of the "Add Book" form, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Genre,
    PublishedYear,
    Isbn,
}

impl BookField {
    const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Genre,
        BookField::PublishedYear,
        BookField::Isbn,
    ];

    fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Genre => "Genre",
            BookField::PublishedYear => "Published Year",
            BookField::Isbn => "ISBN",
        }
    }
}

/// Internal representation of the "Add Book" form.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
    pub(crate) published_year: String,
    pub(crate) isbn: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl BookForm {
    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Genre => &self.genre,
            BookField::PublishedYear => &self.published_year,
            BookField::Isbn => &self.isbn,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Genre => &mut self.genre,
            BookField::PublishedYear => &mut self.published_year,
            BookField::Isbn => &mut self.isbn,
        }
    }

    /// Move focus to the next field, wrapping at the end.
    pub(crate) fn next_field(&mut self) {
        let idx = BookField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        self.active = BookField::ORDER[(idx + 1) % BookField::ORDER.len()];
    }

    /// Append a character to the active field. The year is digits-only and
    /// capped at four characters, matching the numeric widget it replaces.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::PublishedYear => {
                if ch.is_ascii_digit() && self.published_year.len() < 4 {
                    self.published_year.push(ch);
                    true
                } else {
                    false
                }
            }
            field => {
                if !ch.is_control() {
                    self.value_mut(field).push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return typed values ready for persistence:
    /// `(title, author, genre, published_year, isbn)` with blank optionals as
    /// `None`.
    pub(crate) fn parse_inputs(
        &self,
    ) -> Result<(String, String, Option<String>, Option<i64>, Option<String>)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(anyhow!("Author is required."));
        }

        let published_year = match self.published_year.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i64>()
                    .context("Published year must be a number.")?,
            ),
        };

        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Ok((
            title.to_string(),
            author.to_string(),
            optional(&self.genre),
            published_year,
            optional(&self.isbn),
        ))
    }

    /// Render every form line in display order.
    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        BookField::ORDER
            .iter()
            .map(|field| {
                let required = matches!(*field, BookField::Title | BookField::Author);
                field_line(
                    field.label(),
                    self.value(*field),
                    *field == self.active,
                    required,
                )
            })
            .collect()
    }

    /// Cursor offset `(x, y)` within the form body for the focused field.
    pub(crate) fn cursor(&self) -> (u16, u16) {
        let row = BookField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0) as u16;
        (cursor_x(self.active.label(), self.value(self.active)), row)
    }
}

/// Fields of the "Add Member" form, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum MemberField {
    #[default]
    Name,
    Email,
    ContactNumber,
    Address,
}

impl MemberField {
    const ORDER: [MemberField; 4] = [
        MemberField::Name,
        MemberField::Email,
        MemberField::ContactNumber,
        MemberField::Address,
    ];

    fn label(self) -> &'static str {
        match self {
            MemberField::Name => "Name",
            MemberField::Email => "Email",
            MemberField::ContactNumber => "Contact Number",
            MemberField::Address => "Address",
        }
    }
}

/// Internal representation of the "Add Member" form.
#[derive(Default, Clone)]
pub(crate) struct MemberForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) contact_number: String,
    pub(crate) address: String,
    pub(crate) active: MemberField,
    pub(crate) error: Option<String>,
}

impl MemberForm {
    fn value(&self, field: MemberField) -> &str {
        match field {
            MemberField::Name => &self.name,
            MemberField::Email => &self.email,
            MemberField::ContactNumber => &self.contact_number,
            MemberField::Address => &self.address,
        }
    }

    fn value_mut(&mut self, field: MemberField) -> &mut String {
        match field {
            MemberField::Name => &mut self.name,
            MemberField::Email => &mut self.email,
            MemberField::ContactNumber => &mut self.contact_number,
            MemberField::Address => &mut self.address,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let idx = MemberField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        self.active = MemberField::ORDER[(idx + 1) % MemberField::ORDER.len()];
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if !ch.is_control() {
            let field = self.active;
            self.value_mut(field).push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return `(name, email, contact_number,
    /// address)` with blank optionals as `None`.
    pub(crate) fn parse_inputs(
        &self,
    ) -> Result<(String, Option<String>, Option<String>, Option<String>)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name is required."));
        }

        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Ok((
            name.to_string(),
            optional(&self.email),
            optional(&self.contact_number),
            optional(&self.address),
        ))
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        MemberField::ORDER
            .iter()
            .map(|field| {
                field_line(
                    field.label(),
                    self.value(*field),
                    *field == self.active,
                    matches!(*field, MemberField::Name),
                )
            })
            .collect()
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        let row = MemberField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0) as u16;
        (cursor_x(self.active.label(), self.value(self.active)), row)
    }
}

/// Fields of the "Add Borrow Record" form, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BorrowField {
    #[default]
    BookId,
    MemberId,
    BorrowDate,
    DueDate,
}

impl BorrowField {
    const ORDER: [BorrowField; 4] = [
        BorrowField::BookId,
        BorrowField::MemberId,
        BorrowField::BorrowDate,
        BorrowField::DueDate,
    ];

    fn label(self) -> &'static str {
        match self {
            BorrowField::BookId => "Book ID",
            BorrowField::MemberId => "Member ID",
            BorrowField::BorrowDate => "Borrow Date",
            BorrowField::DueDate => "Due Date",
        }
    }
}

/// Internal representation of the "Add Borrow Record" form. Every field is
/// required: ids are digits-only and dates are masked to `YYYY-MM-DD`
/// characters.
#[derive(Default, Clone)]
pub(crate) struct BorrowForm {
    pub(crate) book_id: String,
    pub(crate) member_id: String,
    pub(crate) borrow_date: String,
    pub(crate) due_date: String,
    pub(crate) active: BorrowField,
    pub(crate) error: Option<String>,
}

impl BorrowForm {
    fn value(&self, field: BorrowField) -> &str {
        match field {
            BorrowField::BookId => &self.book_id,
            BorrowField::MemberId => &self.member_id,
            BorrowField::BorrowDate => &self.borrow_date,
            BorrowField::DueDate => &self.due_date,
        }
    }

    fn value_mut(&mut self, field: BorrowField) -> &mut String {
        match field {
            BorrowField::BookId => &mut self.book_id,
            BorrowField::MemberId => &mut self.member_id,
            BorrowField::BorrowDate => &mut self.borrow_date,
            BorrowField::DueDate => &mut self.due_date,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let idx = BorrowField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0);
        self.active = BorrowField::ORDER[(idx + 1) % BorrowField::ORDER.len()];
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BorrowField::BookId | BorrowField::MemberId => {
                if ch.is_ascii_digit() {
                    let field = self.active;
                    self.value_mut(field).push(ch);
                    true
                } else {
                    false
                }
            }
            BorrowField::BorrowDate | BorrowField::DueDate => {
                let value = self.value(self.active);
                if (ch.is_ascii_digit() || ch == '-') && value.len() < 10 {
                    let field = self.active;
                    self.value_mut(field).push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return `(book_id, member_id, borrow_date,
    /// due_date)`. The store checks that the ids actually exist; the form
    /// only guarantees well-formed values.
    pub(crate) fn parse_inputs(&self) -> Result<(i64, i64, String, String)> {
        let book_id = self
            .book_id
            .trim()
            .parse::<i64>()
            .context("Book ID is required and must be a number.")?;
        let member_id = self
            .member_id
            .trim()
            .parse::<i64>()
            .context("Member ID is required and must be a number.")?;

        let borrow_date = self.borrow_date.trim();
        if !is_iso_date(borrow_date) {
            return Err(anyhow!("Borrow date must be YYYY-MM-DD."));
        }
        let due_date = self.due_date.trim();
        if !is_iso_date(due_date) {
            return Err(anyhow!("Due date must be YYYY-MM-DD."));
        }

        Ok((
            book_id,
            member_id,
            borrow_date.to_string(),
            due_date.to_string(),
        ))
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        BorrowField::ORDER
            .iter()
            .map(|field| field_line(field.label(), self.value(*field), *field == self.active, true))
            .collect()
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        let row = BorrowField::ORDER
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0) as u16;
        (cursor_x(self.active.label(), self.value(self.active)), row)
    }
}

/// Render the shared two-line delete form body: a mode switch plus the value
/// input.
fn delete_lines(mode_label: &str, alternatives: &str, value: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw("Delete by: "),
            Span::styled(
                mode_label.to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  (Tab: {alternatives})"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("Value: "),
            Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
        ]),
    ]
}

/// Cursor offset for the value line of a delete form.
fn delete_cursor(value: &str) -> (u16, u16) {
    (("Value: ".len() + value.chars().count()) as u16, 1)
}

/// Delete form for books: by id or by exact title.
#[derive(Default, Clone)]
pub(crate) struct BookDeleteForm {
    pub(crate) by_title: bool,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl BookDeleteForm {
    /// Switch between the two delete modes, clearing the value since the
    /// input mask differs.
    pub(crate) fn toggle_mode(&mut self) {
        self.by_title = !self.by_title;
        self.value.clear();
        self.error = None;
    }

    pub(crate) fn mode_label(&self) -> &'static str {
        if self.by_title {
            "Title"
        } else {
            "ID"
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = if self.by_title {
            !ch.is_control()
        } else {
            ch.is_ascii_digit()
        };
        if accepted {
            self.value.push(ch);
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Turn the raw input into a typed delete selector.
    pub(crate) fn parse(&self) -> Result<BookDeleteKey> {
        if self.by_title {
            let title = self.value.trim();
            if title.is_empty() {
                return Err(anyhow!("Title is required."));
            }
            Ok(BookDeleteKey::ByTitle(title.to_string()))
        } else {
            let id = self
                .value
                .trim()
                .parse::<i64>()
                .context("ID is required and must be a number.")?;
            Ok(BookDeleteKey::ById(id))
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        delete_lines(self.mode_label(), "ID / Title", &self.value)
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        delete_cursor(&self.value)
    }
}

/// Delete form for members: by id or by exact name.
#[derive(Default, Clone)]
pub(crate) struct MemberDeleteForm {
    pub(crate) by_name: bool,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl MemberDeleteForm {
    pub(crate) fn toggle_mode(&mut self) {
        self.by_name = !self.by_name;
        self.value.clear();
        self.error = None;
    }

    pub(crate) fn mode_label(&self) -> &'static str {
        if self.by_name {
            "Name"
        } else {
            "ID"
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = if self.by_name {
            !ch.is_control()
        } else {
            ch.is_ascii_digit()
        };
        if accepted {
            self.value.push(ch);
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse(&self) -> Result<MemberDeleteKey> {
        if self.by_name {
            let name = self.value.trim();
            if name.is_empty() {
                return Err(anyhow!("Name is required."));
            }
            Ok(MemberDeleteKey::ByName(name.to_string()))
        } else {
            let id = self
                .value
                .trim()
                .parse::<i64>()
                .context("ID is required and must be a number.")?;
            Ok(MemberDeleteKey::ById(id))
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        delete_lines(self.mode_label(), "ID / Name", &self.value)
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        delete_cursor(&self.value)
    }
}

/// Delete form for borrow records: by record id or by book id (the latter
/// clears the whole lending history of one book).
#[derive(Default, Clone)]
pub(crate) struct BorrowDeleteForm {
    pub(crate) by_book_id: bool,
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl BorrowDeleteForm {
    pub(crate) fn toggle_mode(&mut self) {
        self.by_book_id = !self.by_book_id;
        self.value.clear();
        self.error = None;
    }

    pub(crate) fn mode_label(&self) -> &'static str {
        if self.by_book_id {
            "Book ID"
        } else {
            "ID"
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        // Both modes are numeric.
        if ch.is_ascii_digit() {
            self.value.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn parse(&self) -> Result<BorrowRecordDeleteKey> {
        let id = self
            .value
            .trim()
            .parse::<i64>()
            .with_context(|| format!("{} is required and must be a number.", self.mode_label()))?;
        if self.by_book_id {
            Ok(BorrowRecordDeleteKey::ByBookId(id))
        } else {
            Ok(BorrowRecordDeleteKey::ById(id))
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        delete_lines(self.mode_label(), "ID / Book ID", &self.value)
    }

    pub(crate) fn cursor(&self) -> (u16, u16) {
        delete_cursor(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_form_masks_year_input() {
        let mut form = BookForm {
            active: BookField::PublishedYear,
            ..BookForm::default()
        };
        assert!(form.push_char('1'));
        assert!(!form.push_char('x'));
        assert!(form.push_char('9'));
        assert!(form.push_char('6'));
        assert!(form.push_char('5'));
        // A fifth digit exceeds the four-character year.
        assert!(!form.push_char('0'));
        assert_eq!(form.published_year, "1965");
    }

    #[test]
    fn book_form_requires_title_and_author() {
        let mut form = BookForm::default();
        assert!(form.parse_inputs().is_err());

        form.title = "Dune".to_string();
        assert!(form.parse_inputs().is_err());

        form.author = "Herbert".to_string();
        let (title, author, genre, year, isbn) = form.parse_inputs().expect("valid form");
        assert_eq!(title, "Dune");
        assert_eq!(author, "Herbert");
        assert_eq!(genre, None);
        assert_eq!(year, None);
        assert_eq!(isbn, None);
    }

    #[test]
    fn member_form_maps_blank_optionals_to_none() {
        let form = MemberForm {
            name: "Alice".to_string(),
            email: "  ".to_string(),
            ..MemberForm::default()
        };
        let (name, email, contact, address) = form.parse_inputs().expect("valid form");
        assert_eq!(name, "Alice");
        assert_eq!(email, None);
        assert_eq!(contact, None);
        assert_eq!(address, None);
    }

    #[test]
    fn borrow_form_rejects_malformed_dates() {
        let mut form = BorrowForm {
            book_id: "1".to_string(),
            member_id: "2".to_string(),
            borrow_date: "2024-3-1".to_string(),
            due_date: "2024-03-15".to_string(),
            ..BorrowForm::default()
        };
        assert!(form.parse_inputs().is_err());

        form.borrow_date = "2024-03-01".to_string();
        let (book_id, member_id, borrow_date, due_date) =
            form.parse_inputs().expect("valid form");
        assert_eq!((book_id, member_id), (1, 2));
        assert_eq!(borrow_date, "2024-03-01");
        assert_eq!(due_date, "2024-03-15");
    }

    #[test]
    fn book_delete_form_produces_typed_selectors() {
        let mut form = BookDeleteForm::default();
        assert!(!form.push_char('D'));
        form.push_char('4');
        form.push_char('2');
        assert_eq!(form.parse().expect("id selector"), BookDeleteKey::ById(42));

        form.toggle_mode();
        assert!(form.value.is_empty());
        for ch in "Dune".chars() {
            form.push_char(ch);
        }
        assert_eq!(
            form.parse().expect("title selector"),
            BookDeleteKey::ByTitle("Dune".to_string())
        );
    }

    #[test]
    fn borrow_delete_form_is_numeric_in_both_modes() {
        let mut form = BorrowDeleteForm::default();
        assert!(!form.push_char('a'));
        form.push_char('7');
        assert_eq!(
            form.parse().expect("id selector"),
            BorrowRecordDeleteKey::ById(7)
        );

        form.toggle_mode();
        form.push_char('3');
        assert_eq!(
            form.parse().expect("book id selector"),
            BorrowRecordDeleteKey::ByBookId(3)
        );
    }

    #[test]
    fn delete_form_parse_reports_missing_value() {
        let form = MemberDeleteForm::default();
        assert!(form.parse().is_err());
    }
}
