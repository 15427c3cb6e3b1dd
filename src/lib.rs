//! Core library surface for the Bookstore Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. These are what `main.rs`
/// uses to initialize the embedded SQLite store.
pub use db::{ensure_schema, BookStore, SqliteStore};

/// The domain type that all layers manipulate.
pub use models::Book;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
