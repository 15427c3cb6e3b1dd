use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::db::BookStore;

use super::controller::{DeleteRequest, FormController, Mode, Outcome};
use super::form::BookField;
use super::helpers::centered_rect;

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 4;
/// Rows taken by the entry form: four fields plus the border.
const FORM_HEIGHT: u16 = 6;

/// Modal state layered over the main screen. Deletion is the only action that
/// needs one.
enum Overlay {
    None,
    ConfirmDelete(DeleteRequest),
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

/// Central application state shared across the TUI: the store, the form/table
/// controller, and the presentation-only bits (overlay, footer, scroll
/// offset).
pub struct App<S: BookStore> {
    store: S,
    controller: FormController,
    overlay: Overlay,
    status: Option<StatusMessage>,
    table_state: TableState,
}

impl<S: BookStore> App<S> {
    /// Hydrate the initial table from the store and start in add mode.
    pub fn new(store: S) -> Result<Self> {
        let mut controller = FormController::new();
        controller.refresh(&store)?;
        Ok(Self {
            store,
            controller,
            overlay: Overlay::None,
            status: None,
            table_state: TableState::default(),
        })
    }

    /// React to a plain key press. Store failures bubble out of here and end
    /// the event loop; the terminal wrapper restores the screen first.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        if let Overlay::ConfirmDelete(request) = std::mem::replace(&mut self.overlay, Overlay::None)
        {
            return self.handle_confirm_delete(code, request);
        }

        match code {
            KeyCode::Tab => self.controller.form.next_field(),
            KeyCode::BackTab => self.controller.form.prev_field(),
            KeyCode::Backspace => self.controller.form.backspace(),
            KeyCode::Down => {
                self.clear_status();
                self.controller.move_selection(1);
            }
            KeyCode::Up => {
                self.clear_status();
                self.controller.move_selection(-1);
            }
            KeyCode::Esc => {
                self.clear_status();
                self.controller.clear();
            }
            KeyCode::Enter => {
                let outcome = match self.controller.mode {
                    Mode::Add => self.controller.add(&self.store)?,
                    Mode::Edit { .. } => self.controller.update(&self.store)?,
                };
                self.apply_outcome(outcome);
            }
            KeyCode::Char(ch) => {
                if self.controller.form.push_char(ch) {
                    self.clear_status();
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Ctrl+D asks to delete the selected book. The controller either hands
    /// back a confirmation request or a selection-required message.
    pub fn handle_ctrl_d(&mut self) -> Result<()> {
        let outcome = self.controller.request_delete();
        self.apply_outcome(outcome);
        Ok(())
    }

    /// Keys while the confirm-delete dialog is up. Only an explicit yes
    /// deletes; anything that dismisses the dialog leaves selection and form
    /// untouched.
    fn handle_confirm_delete(&mut self, code: KeyCode, request: DeleteRequest) -> Result<()> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let outcome = self.controller.confirm_delete(&self.store, &request)?;
                self.apply_outcome(outcome);
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {}
            _ => self.overlay = Overlay::ConfirmDelete(request),
        }
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Completed(message) => self.set_status(message, StatusKind::Info),
            Outcome::Invalid { message, .. } => self.set_status(message, StatusKind::Error),
            Outcome::Confirm(request) => {
                self.clear_status();
                self.overlay = Overlay::ConfirmDelete(request);
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Overlay::ConfirmDelete(request) = &self.overlay {
            self.draw_confirm_delete(frame, area, request);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let title = match self.controller.mode {
            Mode::Add => "Add Book",
            Mode::Edit { .. } => "Edit Book",
        };

        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| self.controller.form.build_line(*field))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if matches!(self.overlay, Overlay::None) {
            let active = self.controller.form.active;
            let prefix = active.label().len() as u16 + 2;
            frame.set_cursor_position((
                inner.x + prefix + self.controller.form.value_len(active) as u16,
                inner.y + active.row(),
            ));
        }
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Books").borders(Borders::ALL);

        if self.controller.rows.is_empty() {
            let message = Paragraph::new("No books yet. Fill in the form and press Enter.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["Id", "Title", "Author", "Price", "Stock"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.controller.rows.iter().map(|book| {
            Row::new(vec![
                Cell::from(book.id.map(|id| id.to_string()).unwrap_or_default()),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                Cell::from(format!("{:.2}", book.price)),
                Cell::from(book.stock.to_string()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        self.table_state.select(self.controller.selected);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = match self.controller.mode {
            Mode::Add => "Tab switch field | Enter add | Down/Up select | Ctrl+Q quit",
            Mode::Edit { .. } => "Enter update | Ctrl+D delete | Esc clear | Ctrl+Q quit",
        };

        let mut lines = Vec::new();
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(
                status.text.clone(),
                status.kind.style(),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )));

        let footer = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, area);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, request: &DeleteRequest) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete \"{}\" permanently?", request.title)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
