//! Terminal UI split across logical submodules: the toolkit-independent
//! interaction controller, the form widget state, and the Ratatui plumbing
//! around them.

mod app;
mod controller;
mod form;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
