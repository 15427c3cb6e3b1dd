//! Binary entry point that glues the SQLite-backed store to the TUI: bring up
//! the database, hydrate the initial app state, and drive the Ratatui event
//! loop until the user exits.
use bookstore_manager::{ensure_schema, run_app, App, SqliteStore};

/// Initialize persistence, load the book table, and launch the event loop.
///
/// Returning a `Result` bubbles up fatal problems (for example the user
/// removing the writable data directory, or a store failure mid-session) to
/// the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let store = SqliteStore::new(conn);

    let mut app = App::new(store)?;
    run_app(&mut app)
}
