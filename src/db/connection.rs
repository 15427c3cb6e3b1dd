use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".bookstore-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Create the books table on a connection that does not have it yet. Split out
/// from [`ensure_schema`] so tests can run against an in-memory database.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT,
            price REAL NOT NULL,
            stock INTEGER NOT NULL
        )",
        [],
    )
    .context("failed to create books table")?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
