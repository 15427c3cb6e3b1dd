use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Fields available within the entry form. The id column is deliberately
/// absent: it is tracked by the controller and never user-editable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Price,
    Stock,
}

impl Default for BookField {
    fn default() -> Self {
        BookField::Title
    }
}

impl BookField {
    /// Fields in the order they appear on screen, used for focus cycling and
    /// cursor placement.
    pub(crate) const ALL: [BookField; 4] = [
        BookField::Title,
        BookField::Author,
        BookField::Price,
        BookField::Stock,
    ];

    /// Label rendered before the value, also used to compute the cursor
    /// offset.
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Price => "Price",
            BookField::Stock => "Stock",
        }
    }

    /// Row offset of the field inside the form widget.
    pub(crate) fn row(self) -> u16 {
        match self {
            BookField::Title => 0,
            BookField::Author => 1,
            BookField::Price => 2,
            BookField::Stock => 3,
        }
    }
}

/// Internal representation of the entry form. All values stay raw text until
/// the controller validates them; the form itself only filters obviously
/// impossible characters per field.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) price: String,
    pub(crate) stock: String,
    pub(crate) active: BookField,
}

impl BookForm {
    /// Populate every editable field from a table row when entering edit
    /// mode.
    pub(crate) fn set_from(&mut self, book: &Book) {
        self.title = book.title.clone();
        self.author = book.author.clone();
        self.price = book.price.to_string();
        self.stock = book.stock.to_string();
    }

    /// Blank all fields and return focus to the title.
    pub(crate) fn clear(&mut self) {
        self.title.clear();
        self.author.clear();
        self.price.clear();
        self.stock.clear();
        self.active = BookField::Title;
    }

    /// Switch focus to a particular field.
    pub(crate) fn focus(&mut self, field: BookField) {
        self.active = field;
    }

    /// Move focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Price,
            BookField::Price => BookField::Stock,
            BookField::Stock => BookField::Title,
        };
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn prev_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Stock,
            BookField::Author => BookField::Title,
            BookField::Price => BookField::Author,
            BookField::Stock => BookField::Price,
        };
    }

    /// Append a character to the active field, filtering input the field can
    /// never accept. The numeric fields still go through full parsing at
    /// submit time; this only keeps letters out of them.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Title => {
                if ch.is_control() {
                    return false;
                }
                self.title.push(ch);
            }
            BookField::Author => {
                if ch.is_control() {
                    return false;
                }
                self.author.push(ch);
            }
            BookField::Price => {
                if !ch.is_ascii_digit() && ch != '.' && ch != '-' {
                    return false;
                }
                self.price.push(ch);
            }
            BookField::Stock => {
                if !ch.is_ascii_digit() && ch != '-' {
                    return false;
                }
                self.stock.push(ch);
            }
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Borrow the raw text of the requested field.
    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Price => &self.price,
            BookField::Stock => &self.stock,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Price => &mut self.price,
            BookField::Stock => &mut self.stock,
        }
    }

    /// Render a styled line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            BookField::Author => "<optional>",
            _ => "<required>",
        };

        let display = if value.is_empty() {
            placeholder.to_string()
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
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_reject_letters() {
        let mut form = BookForm::default();
        form.focus(BookField::Price);
        assert!(!form.push_char('x'));
        assert!(form.push_char('1'));
        assert!(form.push_char('.'));
        assert!(form.push_char('5'));
        assert_eq!(form.price, "1.5");

        form.focus(BookField::Stock);
        assert!(!form.push_char('.'));
        assert!(form.push_char('-'));
        assert!(form.push_char('3'));
        assert_eq!(form.stock, "-3");
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = BookForm::default();
        for expected in [
            BookField::Author,
            BookField::Price,
            BookField::Stock,
            BookField::Title,
        ] {
            form.next_field();
            assert_eq!(form.active, expected);
        }
        form.prev_field();
        assert_eq!(form.active, BookField::Stock);
    }

    #[test]
    fn set_from_renders_numbers_as_text() {
        let mut form = BookForm::default();
        form.set_from(&Book {
            id: Some(3),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 19.99,
            stock: 5,
        });
        assert_eq!(form.title, "Dune");
        assert_eq!(form.price, "19.99");
        assert_eq!(form.stock, "5");
    }

    #[test]
    fn clear_blanks_everything_and_resets_focus() {
        let mut form = BookForm::default();
        form.title.push_str("Dune");
        form.focus(BookField::Stock);
        form.clear();
        assert!(form.title.is_empty());
        assert_eq!(form.active, BookField::Title);
    }
}
