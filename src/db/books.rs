use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::StoreError;
use crate::models::Book;

/// Retrieve every book ordered by id. The query doubles as the single source
/// of truth for how the store orders rows; the UI imposes no order of its own.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT id, title, author, price, stock FROM books ORDER BY id")
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                author: row.get(2)?,
                price: row.get(3)?,
                stock: row.get(4)?,
            })
        })
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Insert a brand new book row, returning the hydrated struct so the caller
/// can show the assigned id without re-querying the database.
pub fn insert_book(conn: &Connection, book: &Book) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, price, stock) VALUES (?1, ?2, ?3, ?4)",
        params![book.title, book.author, book.price, book.stock],
    )
    .context("failed to insert book")?;

    let id = conn.last_insert_rowid();
    Ok(Book {
        id: Some(id),
        ..book.clone()
    })
}

/// Update all editable fields of an existing book. We surface an explicit
/// error when zero rows are touched so the UI can show a friendly message
/// instead of silently continuing.
pub fn update_book(conn: &Connection, id: i64, book: &Book) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE books SET title = ?1, author = ?2, price = ?3, stock = ?4 WHERE id = ?5",
            params![book.title, book.author, book.price, book.stock, id],
        )
        .context("failed to update book")?;

    if updated == 0 {
        Err(StoreError::NotFound.into())
    } else {
        Ok(())
    }
}

/// Remove a book row by id.
pub fn delete_book(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("failed to delete book")?;

    if deleted == 0 {
        Err(StoreError::NotFound.into())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::apply_schema;

    fn memory_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory database");
        apply_schema(&conn).expect("schema");
        conn
    }

    fn sample(title: &str) -> Book {
        Book {
            id: None,
            title: title.to_string(),
            author: "Herbert".to_string(),
            price: 19.99,
            stock: 5,
        }
    }

    #[test]
    fn insert_assigns_id_and_echoes_fields() {
        let conn = memory_conn();
        let saved = insert_book(&conn, &sample("Dune")).expect("insert");
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.title, "Dune");
        assert_eq!(saved.price, 19.99);
        assert_eq!(saved.stock, 5);
    }

    #[test]
    fn fetch_returns_rows_in_id_order() {
        let conn = memory_conn();
        insert_book(&conn, &sample("Dune")).expect("insert");
        insert_book(&conn, &sample("Messiah")).expect("insert");

        let books = fetch_books(&conn).expect("fetch");
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Dune", "Messiah"]);
        assert_eq!(books[0].id, Some(1));
        assert_eq!(books[1].id, Some(2));
    }

    #[test]
    fn update_rewrites_all_fields() {
        let conn = memory_conn();
        let saved = insert_book(&conn, &sample("Dune")).expect("insert");

        let mut changed = saved.clone();
        changed.title = "Dune Messiah".to_string();
        changed.price = 24.5;
        changed.stock = 2;
        update_book(&conn, saved.id.unwrap(), &changed).expect("update");

        let books = fetch_books(&conn).expect("fetch");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune Messiah");
        assert_eq!(books[0].price, 24.5);
        assert_eq!(books[0].stock, 2);
    }

    #[test]
    fn update_missing_row_reports_not_found() {
        let conn = memory_conn();
        let err = update_book(&conn, 42, &sample("Dune")).expect_err("missing row");
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    #[test]
    fn delete_removes_only_the_requested_row() {
        let conn = memory_conn();
        let first = insert_book(&conn, &sample("Dune")).expect("insert");
        insert_book(&conn, &sample("Messiah")).expect("insert");

        delete_book(&conn, first.id.unwrap()).expect("delete");

        let books = fetch_books(&conn).expect("fetch");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Messiah");
    }

    #[test]
    fn delete_missing_row_reports_not_found() {
        let conn = memory_conn();
        let err = delete_book(&conn, 7).expect_err("missing row");
        assert!(err.downcast_ref::<StoreError>().is_some());
    }
}
