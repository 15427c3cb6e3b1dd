//! Persistence module split across logical submodules. The [`BookStore`]
//! trait is the seam the form controller talks through, so the interaction
//! logic stays testable without a real database behind it.

mod books;
mod connection;

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use thiserror::Error;

use crate::models::Book;

pub use books::{delete_book, fetch_books, insert_book, update_book};
pub use connection::{apply_schema, ensure_schema};

/// Typed failures from the row-level helpers that callers may want to match
/// on rather than string-compare.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update or delete touched zero rows.
    #[error("book not found")]
    NotFound,
}

/// Persistence boundary for book records. `save` doubles as insert and
/// update: a record without an id is inserted and echoed back hydrated, a
/// record with an id updates the matching row.
pub trait BookStore {
    fn list(&self) -> Result<Vec<Book>>;
    fn save(&self, book: &Book) -> Result<Book>;
    fn delete(&self, book: &Book) -> Result<()>;
}

/// [`BookStore`] implementation over an embedded SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl BookStore for SqliteStore {
    fn list(&self) -> Result<Vec<Book>> {
        fetch_books(&self.conn)
    }

    fn save(&self, book: &Book) -> Result<Book> {
        match book.id {
            None => insert_book(&self.conn, book),
            Some(id) => {
                update_book(&self.conn, id, book)?;
                Ok(book.clone())
            }
        }
    }

    fn delete(&self, book: &Book) -> Result<()> {
        let id = book
            .id
            .ok_or_else(|| anyhow!("cannot delete a book that was never saved"))?;
        delete_book(&self.conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> SqliteStore {
        let conn = Connection::open_in_memory().expect("in-memory database");
        apply_schema(&conn).expect("schema");
        SqliteStore::new(conn)
    }

    #[test]
    fn save_without_id_inserts() {
        let store = memory_store();
        let book = Book {
            id: None,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 19.99,
            stock: 5,
        };

        let saved = store.save(&book).expect("save");
        assert_eq!(saved.id, Some(1));
        assert_eq!(store.list().expect("list").len(), 1);
    }

    #[test]
    fn save_with_id_updates_in_place() {
        let store = memory_store();
        let saved = store
            .save(&Book {
                id: None,
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                price: 19.99,
                stock: 5,
            })
            .expect("insert");

        let mut changed = saved.clone();
        changed.stock = 12;
        store.save(&changed).expect("update");

        let rows = store.list().expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stock, 12);
    }

    #[test]
    fn delete_only_needs_the_id() {
        let store = memory_store();
        let saved = store
            .save(&Book {
                id: None,
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                price: 19.99,
                stock: 5,
            })
            .expect("insert");

        store
            .delete(&Book::with_id(saved.id.unwrap()))
            .expect("delete");
        assert!(store.list().expect("list").is_empty());
    }

    #[test]
    fn delete_without_id_is_rejected() {
        let store = memory_store();
        assert!(store.delete(&Book::default()).is_err());
    }
}
