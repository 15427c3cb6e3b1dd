//! Domain model that mirrors the SQLite schema and gets passed throughout the
//! TUI. The intent is that this type stays a light-weight data holder so other
//! layers can focus on presentation and persistence logic.

#[derive(Debug, Clone, Default, PartialEq)]
/// In-memory representation of one book in the inventory.
pub struct Book {
    /// Primary key from the SQLite store. `None` marks a record that has not
    /// been persisted yet; the store assigns the id on first save.
    pub id: Option<i64>,
    /// Title shown in the table and required before any save.
    pub title: String,
    /// Author field, free text with no presence constraint.
    pub author: String,
    /// Unit price. Parsed from the form, no sign or range constraint.
    pub price: f64,
    /// Units on hand. Parsed from the form, no sign or range constraint.
    pub stock: i64,
}

impl Book {
    /// Build a record carrying only an id, the shape handed to the store for
    /// deletion where the remaining fields are ignored.
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
