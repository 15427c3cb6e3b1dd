//! The form/table interaction controller. Everything with actual state
//! machine behavior lives here, independent of any terminal widget, so the
//! validation and mode transitions are written and tested exactly once.

use anyhow::Result;

use crate::db::BookStore;
use crate::models::Book;

use super::form::{BookField, BookForm};

pub(crate) const MSG_ENTER_TITLE: &str = "Enter the book title.";
pub(crate) const MSG_ENTER_VALID_PRICE: &str = "Enter a valid number for the price.";
pub(crate) const MSG_ENTER_VALID_STOCK: &str = "Enter a whole number for the stock count.";
pub(crate) const MSG_SELECT_TO_UPDATE: &str = "Select a book from the table.";
pub(crate) const MSG_SELECT_TO_DELETE: &str = "Select a book to delete.";
pub(crate) const MSG_BOOK_ADDED: &str = "Book added.";
pub(crate) const MSG_BOOK_UPDATED: &str = "Book updated.";
pub(crate) const MSG_BOOK_DELETED: &str = "Book deleted.";

/// The two interaction modes. The controller starts in `Add`; selecting a
/// table row switches to `Edit` carrying the row's id, and every successful
/// mutation (or an explicit clear) drops back to `Add`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Add,
    Edit { id: i64 },
}

/// A destructive action waiting for the user's explicit yes. Holding the
/// title lets the dialog name the book it is about to remove.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DeleteRequest {
    pub(crate) id: i64,
    pub(crate) title: String,
}

/// Result of one attempted operation. `Invalid` is the only failure class the
/// controller converts into a user-facing message; store errors propagate as
/// `Err` instead.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    /// The operation ran and the table was refreshed.
    Completed(&'static str),
    /// A precondition failed; nothing was mutated. `field` names the input to
    /// refocus where one applies.
    Invalid {
        field: Option<BookField>,
        message: &'static str,
    },
    /// Deletion needs the confirmation dialog before anything happens.
    Confirm(DeleteRequest),
}

impl Outcome {
    fn invalid(field: BookField, message: &'static str) -> Self {
        Outcome::Invalid {
            field: Some(field),
            message,
        }
    }
}

/// Owns the row projection, the selection, the entry form, and the mode.
/// Operations take the store as a parameter so the controller itself carries
/// no database handle.
pub(crate) struct FormController {
    pub(crate) rows: Vec<Book>,
    pub(crate) selected: Option<usize>,
    pub(crate) form: BookForm,
    pub(crate) mode: Mode,
}

impl FormController {
    pub(crate) fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            form: BookForm::default(),
            mode: Mode::Add,
        }
    }

    /// Rebuild the row projection from the store, keeping whatever order the
    /// store returned. A selection pointing past the new row count is
    /// dropped.
    pub(crate) fn refresh(&mut self, store: &impl BookStore) -> Result<()> {
        self.rows = store.list()?;
        if let Some(index) = self.selected {
            if index >= self.rows.len() {
                self.selected = None;
                self.mode = Mode::Add;
            }
        }
        Ok(())
    }

    /// Select a table row: populate the editable fields from it and switch to
    /// edit mode. Out-of-range indices are ignored.
    pub(crate) fn select_row(&mut self, index: usize) {
        let Some(book) = self.rows.get(index) else {
            return;
        };
        let Some(id) = book.id else {
            return;
        };
        self.form.set_from(book);
        self.selected = Some(index);
        self.mode = Mode::Edit { id };
    }

    /// Move the selection by `delta` rows, clamping at the table edges. With
    /// no current selection any movement selects the first row.
    pub(crate) fn move_selection(&mut self, delta: i64) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.selected {
            None => 0,
            Some(current) => {
                let max = self.rows.len() as i64 - 1;
                (current as i64 + delta).clamp(0, max) as usize
            }
        };
        self.select_row(next);
    }

    /// Blank the form, drop the selection, and return to add mode.
    pub(crate) fn clear(&mut self) {
        self.form.clear();
        self.selected = None;
        self.mode = Mode::Add;
    }

    /// Validate the form and create a new record. On success the form is
    /// cleared and the table refreshed; on a validation failure nothing is
    /// touched and focus moves to the offending field.
    pub(crate) fn add(&mut self, store: &impl BookStore) -> Result<Outcome> {
        let book = match self.parse_inputs() {
            Ok(book) => book,
            Err(outcome) => {
                self.apply_focus(&outcome);
                return Ok(outcome);
            }
        };

        store.save(&book)?;
        self.clear();
        self.refresh(store)?;
        Ok(Outcome::Completed(MSG_BOOK_ADDED))
    }

    /// Validate the form and rewrite the selected record. Requires edit mode;
    /// the field checks are the same guarded ones `add` runs, so a malformed
    /// price here is a message rather than a crash.
    pub(crate) fn update(&mut self, store: &impl BookStore) -> Result<Outcome> {
        let id = match self.mode {
            Mode::Edit { id } => id,
            Mode::Add => {
                return Ok(Outcome::Invalid {
                    field: None,
                    message: MSG_SELECT_TO_UPDATE,
                })
            }
        };

        let book = match self.parse_inputs() {
            Ok(book) => book,
            Err(outcome) => {
                self.apply_focus(&outcome);
                return Ok(outcome);
            }
        };

        store.save(&Book {
            id: Some(id),
            ..book
        })?;
        self.clear();
        self.refresh(store)?;
        Ok(Outcome::Completed(MSG_BOOK_UPDATED))
    }

    /// Ask to delete the selected record. Nothing is mutated here; the caller
    /// shows the confirmation dialog and comes back through
    /// [`FormController::confirm_delete`] only on an explicit yes.
    pub(crate) fn request_delete(&self) -> Outcome {
        match (self.mode, self.selected.and_then(|i| self.rows.get(i))) {
            (Mode::Edit { id }, Some(book)) => Outcome::Confirm(DeleteRequest {
                id,
                title: book.title.clone(),
            }),
            _ => Outcome::Invalid {
                field: None,
                message: MSG_SELECT_TO_DELETE,
            },
        }
    }

    /// Carry out a confirmed deletion. The record handed to the store carries
    /// only the id; a declined dialog never reaches this point.
    pub(crate) fn confirm_delete(
        &mut self,
        store: &impl BookStore,
        request: &DeleteRequest,
    ) -> Result<Outcome> {
        store.delete(&Book::with_id(request.id))?;
        self.clear();
        self.refresh(store)?;
        Ok(Outcome::Completed(MSG_BOOK_DELETED))
    }

    /// Check the form fields in order, failing fast on the first problem.
    fn parse_inputs(&self) -> std::result::Result<Book, Outcome> {
        let title = self.form.title.trim();
        if title.is_empty() {
            return Err(Outcome::invalid(BookField::Title, MSG_ENTER_TITLE));
        }

        let price = self
            .form
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| Outcome::invalid(BookField::Price, MSG_ENTER_VALID_PRICE))?;

        let stock = self
            .form
            .stock
            .trim()
            .parse::<i64>()
            .map_err(|_| Outcome::invalid(BookField::Stock, MSG_ENTER_VALID_STOCK))?;

        Ok(Book {
            id: None,
            title: title.to_string(),
            author: self.form.author.trim().to_string(),
            price,
            stock,
        })
    }

    fn apply_focus(&mut self, outcome: &Outcome) {
        if let Outcome::Invalid {
            field: Some(field), ..
        } = outcome
        {
            self.form.focus(*field);
        }
    }
}
