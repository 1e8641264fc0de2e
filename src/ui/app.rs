use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    delete_book, delete_borrow_record, delete_member, fetch_all_books, fetch_all_borrow_records,
    fetch_all_members, insert_book, insert_borrow_record, insert_member,
};

use super::forms::{
    BookDeleteForm, BookForm, BorrowDeleteForm, BorrowForm, MemberDeleteForm, MemberForm,
};
use super::helpers::{centered_rect, surface_error};
use super::screens::{books_table, borrow_records_table, members_table, RecordTable};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows a PageUp/PageDown press jumps in a record table.
const PAGE_STEP: isize = 10;

/// Navigable data sections, in sidebar order.
const SECTIONS: [&str; 3] = ["Books", "Members", "Borrow Records"];

/// Static decoration for the home screen. The terminal stand-in for the
/// remote animation the hosted original fetched at render time.
const HOME_ART: &[&str] = &[
    " ______________________________________ ",
    "|  _____   _____   _____   _____   ___ |",
    "| |     | |     | |     | |     | |   ||",
    "| |  L  | |  I  | |  B  | |  R  | | A ||",
    "| |     | |     | |     | |     | |   ||",
    "| |_____| |_____| |_____| |_____| |___||",
    "|______________________________________|",
    "|  _____   _____   _____   _____       |",
    "| |     | |     | |     | |     |  ____|",
    "| |  R  | |  Y  | |     | |     | |    |",
    "| |     | |     | |     | |     | |    |",
    "| |_____| |_____| |_____| |_____| |____|",
    "|______________________________________|",
];

/// High-level navigation states. Each record screen owns the table it is
/// currently displaying so a redraw never re-queries the database.
enum Screen {
    Home,
    Books(RecordTable),
    Members(RecordTable),
    BorrowRecords(RecordTable),
}

/// Fine-grained modes scoped to the current screen. Only insert and delete
/// exist; there is deliberately no editing mode for any record type.
enum Mode {
    Normal,
    AddingBook(BookForm),
    DeletingBook(BookDeleteForm),
    AddingMember(MemberForm),
    DeletingMember(MemberDeleteForm),
    AddingBorrow(BorrowForm),
    DeletingBorrow(BorrowDeleteForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The connection is the
/// process-wide database handle: acquired once in `main`, threaded through
/// every store call, released when the app is dropped on exit.
pub struct App {
    conn: Connection,
    screen: Screen,
    home_selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            screen: Screen::Home,
            home_selected: 0,
            mode: Mode::Normal,
            status: Some(StatusMessage {
                text: "Library catalog ready: books, members, and borrow_records tables are in \
                       place."
                    .to_string(),
                kind: StatusKind::Info,
            }),
        }
    }

    /// Dispatch one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::DeletingBook(form) => self.handle_delete_book(code, form)?,
            Mode::AddingMember(form) => self.handle_add_member(code, form)?,
            Mode::DeletingMember(form) => self.handle_delete_member(code, form)?,
            Mode::AddingBorrow(form) => self.handle_add_borrow(code, form)?,
            Mode::DeletingBorrow(form) => self.handle_delete_borrow(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Home => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                }
                KeyCode::Up => {
                    self.home_selected = self.home_selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    self.home_selected = (self.home_selected + 1).min(SECTIONS.len() - 1);
                }
                KeyCode::Enter => {
                    self.clear_status();
                    self.open_section(self.home_selected)?;
                }
                KeyCode::Char('1') => {
                    self.clear_status();
                    self.open_section(0)?;
                }
                KeyCode::Char('2') => {
                    self.clear_status();
                    self.open_section(1)?;
                }
                KeyCode::Char('3') => {
                    self.clear_status();
                    self.open_section(2)?;
                }
                _ => {}
            },
            Screen::Books(_) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    self.clear_status();
                    self.screen = Screen::Home;
                }
                KeyCode::Char('a') => {
                    self.clear_status();
                    return Ok(Mode::AddingBook(BookForm::default()));
                }
                KeyCode::Char('d') => {
                    self.clear_status();
                    return Ok(Mode::DeletingBook(BookDeleteForm::default()));
                }
                KeyCode::Char('r') => {
                    self.refresh_books()?;
                    self.set_status("Books reloaded.", StatusKind::Info);
                }
                code => self.scroll_current(code),
            },
            Screen::Members(_) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    self.clear_status();
                    self.screen = Screen::Home;
                }
                KeyCode::Char('a') => {
                    self.clear_status();
                    return Ok(Mode::AddingMember(MemberForm::default()));
                }
                KeyCode::Char('d') => {
                    self.clear_status();
                    return Ok(Mode::DeletingMember(MemberDeleteForm::default()));
                }
                KeyCode::Char('r') => {
                    self.refresh_members()?;
                    self.set_status("Members reloaded.", StatusKind::Info);
                }
                code => self.scroll_current(code),
            },
            Screen::BorrowRecords(_) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    self.clear_status();
                    self.screen = Screen::Home;
                }
                KeyCode::Char('a') => {
                    self.clear_status();
                    return Ok(Mode::AddingBorrow(BorrowForm::default()));
                }
                KeyCode::Char('d') => {
                    self.clear_status();
                    return Ok(Mode::DeletingBorrow(BorrowDeleteForm::default()));
                }
                KeyCode::Char('r') => {
                    self.refresh_borrow_records()?;
                    self.set_status("Borrow records reloaded.", StatusKind::Info);
                }
                code => self.scroll_current(code),
            },
        }
        Ok(Mode::Normal)
    }

    /// Shared scroll handling for whichever record table is on screen.
    fn scroll_current(&mut self, code: KeyCode) {
        let table = match &mut self.screen {
            Screen::Books(table) | Screen::Members(table) | Screen::BorrowRecords(table) => table,
            Screen::Home => return,
        };
        match code {
            KeyCode::Up => table.scroll_by(-1),
            KeyCode::Down => table.scroll_by(1),
            KeyCode::PageUp => table.scroll_by(-PAGE_STEP),
            KeyCode::PageDown => table.scroll_by(PAGE_STEP),
            KeyCode::Home => table.scroll = 0,
            KeyCode::End => table.scroll = table.rows.len().saturating_sub(1),
            _ => {}
        }
    }

    fn open_section(&mut self, index: usize) -> Result<()> {
        match index {
            0 => self.refresh_books(),
            1 => self.refresh_members(),
            _ => self.refresh_borrow_records(),
        }
    }

    /// Re-run the books fetch and swap the fresh rows into the view. When the
    /// books screen is already up, the scroll position survives the refresh.
    fn refresh_books(&mut self) -> Result<()> {
        let fresh = books_table(&fetch_all_books(&self.conn)?);
        match &mut self.screen {
            Screen::Books(table) => table.set_rows(fresh.rows),
            _ => self.screen = Screen::Books(fresh),
        }
        Ok(())
    }

    fn refresh_members(&mut self) -> Result<()> {
        let fresh = members_table(&fetch_all_members(&self.conn)?);
        match &mut self.screen {
            Screen::Members(table) => table.set_rows(fresh.rows),
            _ => self.screen = Screen::Members(fresh),
        }
        Ok(())
    }

    fn refresh_borrow_records(&mut self) -> Result<()> {
        let fresh = borrow_records_table(&fetch_all_borrow_records(&self.conn)?);
        match &mut self.screen {
            Screen::BorrowRecords(table) => table.set_rows(fresh.rows),
            _ => self.screen = Screen::BorrowRecords(fresh),
        }
        Ok(())
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (title, author, genre, published_year, isbn) = form.parse_inputs()?;
        let id = insert_book(
            &self.conn,
            &title,
            &author,
            genre.as_deref(),
            published_year,
            isbn.as_deref(),
        )?;
        self.refresh_books()?;
        self.set_status(
            format!("Book record inserted successfully (id {id})."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_delete_book(&mut self, code: KeyCode, mut form: BookDeleteForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Delete book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_mode(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.delete_books(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::DeletingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn delete_books(&mut self, form: &BookDeleteForm) -> Result<()> {
        let key = form.parse()?;
        let removed = delete_book(&self.conn, key)?;
        self.refresh_books()?;
        let noun = if removed == 1 { "record" } else { "records" };
        self.set_status(
            format!("Deleted {removed} book {noun}."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_add_member(&mut self, code: KeyCode, mut form: MemberForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add member cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_member(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingMember(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_member(&mut self, form: &MemberForm) -> Result<()> {
        let (name, email, contact_number, address) = form.parse_inputs()?;
        let id = insert_member(
            &self.conn,
            &name,
            email.as_deref(),
            contact_number.as_deref(),
            address.as_deref(),
        )?;
        self.refresh_members()?;
        self.set_status(
            format!("Member record inserted successfully (id {id})."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_delete_member(&mut self, code: KeyCode, mut form: MemberDeleteForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Delete member cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_mode(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.delete_members(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::DeletingMember(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn delete_members(&mut self, form: &MemberDeleteForm) -> Result<()> {
        let key = form.parse()?;
        let removed = delete_member(&self.conn, key)?;
        self.refresh_members()?;
        let noun = if removed == 1 { "record" } else { "records" };
        self.set_status(
            format!("Deleted {removed} member {noun}."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_add_borrow(&mut self, code: KeyCode, mut form: BorrowForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add borrow record cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_borrow(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBorrow(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_borrow(&mut self, form: &BorrowForm) -> Result<()> {
        let (book_id, member_id, borrow_date, due_date) = form.parse_inputs()?;
        let id = insert_borrow_record(&self.conn, book_id, member_id, &borrow_date, &due_date)?;
        self.refresh_borrow_records()?;
        self.set_status(
            format!("Borrow record inserted successfully (id {id})."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_delete_borrow(&mut self, code: KeyCode, mut form: BorrowDeleteForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Delete borrow record cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_mode(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.delete_borrows(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::DeletingBorrow(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn delete_borrows(&mut self, form: &BorrowDeleteForm) -> Result<()> {
        let key = form.parse()?;
        let removed = delete_borrow_record(&self.conn, key)?;
        self.refresh_borrow_records()?;
        let noun = if removed == 1 { "record" } else { "records" };
        self.set_status(
            format!("Deleted {removed} borrow {noun}."),
            StatusKind::Info,
        );
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home => self.draw_home(frame, content_area),
            Screen::Books(table) => self.draw_records(frame, content_area, "Books", table),
            Screen::Members(table) => self.draw_records(frame, content_area, "Members", table),
            Screen::BorrowRecords(table) => {
                self.draw_records(frame, content_area, "Borrow Records", table)
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => {
                self.draw_entry_form(frame, area, "Add Book", form.lines(), form.cursor())
            }
            Mode::DeletingBook(form) => {
                self.draw_delete_form(frame, area, "Delete Book", form.lines(), form.cursor())
            }
            Mode::AddingMember(form) => {
                self.draw_entry_form(frame, area, "Add Member", form.lines(), form.cursor())
            }
            Mode::DeletingMember(form) => {
                self.draw_delete_form(frame, area, "Delete Member", form.lines(), form.cursor())
            }
            Mode::AddingBorrow(form) => {
                self.draw_entry_form(frame, area, "Add Borrow Record", form.lines(), form.cursor())
            }
            Mode::DeletingBorrow(form) => self.draw_delete_form(
                frame,
                area,
                "Delete Borrow Record",
                form.lines(),
                form.cursor(),
            ),
            Mode::Normal => {}
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = SECTIONS
            .iter()
            .enumerate()
            .map(|(idx, section)| {
                let style = if idx == self.home_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(format!("{} {section}", idx + 1), style))
            })
            .collect();

        let nav = List::new(items).block(
            Block::default()
                .title("Navigation")
                .borders(Borders::ALL),
        );
        frame.render_widget(nav, chunks[0]);

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                "Library Management System",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            HOME_ART
                .iter()
                .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::DarkGray)))),
        );

        let home = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Home").borders(Borders::ALL));
        frame.render_widget(home, chunks[1]);
    }

    /// Render a record table with fixed headers in schema column order. The
    /// scroll offset skips leading rows; the widget clips the rest to the
    /// viewport.
    fn draw_records(&self, frame: &mut Frame, area: Rect, title: &str, table: &RecordTable) {
        let block = Block::default()
            .title(format!("{title} ({})", table.rows.len()))
            .borders(Borders::ALL);

        if table.rows.is_empty() {
            let message = Paragraph::new("No records yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(
            table
                .headers
                .iter()
                .map(|name| Cell::from(*name))
                .collect::<Vec<_>>(),
        )
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let rows = table.rows.iter().skip(table.scroll).map(|cells| {
            Row::new(cells.iter().map(|cell| Cell::from(cell.clone())).collect::<Vec<_>>())
        });

        let widths: Vec<Constraint> = table
            .widths
            .iter()
            .map(|width| Constraint::Length(*width))
            .collect();

        let widget = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(widget, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingBook(_) | Mode::AddingMember(_) | Mode::AddingBorrow(_)) => {
                Line::from(vec![
                    Span::styled("[Enter]", key_style),
                    Span::raw(" Save   "),
                    Span::styled("[Tab]", key_style),
                    Span::raw(" Next Field   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Cancel"),
                ])
            }
            (_, Mode::DeletingBook(_) | Mode::DeletingMember(_) | Mode::DeletingBorrow(_)) => {
                Line::from(vec![
                    Span::styled("[Enter]", key_style),
                    Span::raw(" Delete   "),
                    Span::styled("[Tab]", key_style),
                    Span::raw(" Switch Mode   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Cancel"),
                ])
            }
            (Screen::Home, _) => Line::from(vec![
                Span::styled("[\u{2191}\u{2193}]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[1-3]", key_style),
                Span::raw(" Sections   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("[a]", key_style),
                Span::raw(" Add   "),
                Span::styled("[d]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[r]", key_style),
                Span::raw(" Reload   "),
                Span::styled("[\u{2191}\u{2193}/PgUp/PgDn]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Home   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_entry_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        cursor: (u16, u16),
    ) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        lines.push(Line::from(""));
        lines.push(self.form_hint_line("Enter to save \u{2022} Tab to next field \u{2022} Esc to cancel"));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        frame.set_cursor_position((inner.x + cursor.0, inner.y + cursor.1));
    }

    fn draw_delete_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        cursor: (u16, u16),
    ) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        lines.push(Line::from(""));
        lines.push(
            self.form_hint_line("Enter to delete \u{2022} Tab to switch mode \u{2022} Esc to cancel"),
        );

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        frame.set_cursor_position((inner.x + cursor.0, inner.y + cursor.1));
    }

    /// The trailing line of a form popup: the active error if there is one,
    /// otherwise the key hint.
    fn form_hint_line(&self, hint: &str) -> Line<'static> {
        let form_error = match &self.mode {
            Mode::AddingBook(form) => form.error.clone(),
            Mode::DeletingBook(form) => form.error.clone(),
            Mode::AddingMember(form) => form.error.clone(),
            Mode::DeletingMember(form) => form.error.clone(),
            Mode::AddingBorrow(form) => form.error.clone(),
            Mode::DeletingBorrow(form) => form.error.clone(),
            Mode::Normal => None,
        };

        match form_error {
            Some(error) => Line::from(Span::styled(error, Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::Gray),
            )),
        }
    }
}
