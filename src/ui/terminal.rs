use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::db::BookStore;

use super::app::App;

/// Spin up the terminal backend, enter the draw loop, and keep processing
/// input until the user quits with Ctrl+Q. Store failures bubble out of the
/// loop; the terminal is restored either way, so the host process observes
/// the error instead of a torn screen.
pub fn run_app<S: BookStore>(app: &mut App<S>) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = loop {
        if let Err(err) = terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")
        {
            break Err(err);
        }

        match poll_key() {
            Ok(Some((code, modifiers))) => {
                if modifiers.contains(KeyModifiers::CONTROL) {
                    match code {
                        KeyCode::Char('q') => break Ok(()),
                        KeyCode::Char('d') => {
                            if let Err(err) = app.handle_ctrl_d() {
                                break Err(err);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                if let Err(err) = app.handle_key(code) {
                    break Err(err);
                }
            }
            Ok(None) => {}
            Err(err) => break Err(err),
        }
    };

    cleanup_terminal(&mut terminal)?;
    result
}

/// Wait briefly for the next key press, ignoring everything but presses.
fn poll_key() -> Result<Option<(KeyCode, KeyModifiers)>> {
    if !event::poll(Duration::from_millis(250)).context("event polling failed")? {
        return Ok(None);
    }
    if let Event::Key(key_event) = event::read().context("failed to read event")? {
        if key_event.kind == KeyEventKind::Press {
            return Ok(Some((key_event.code, key_event.modifiers)));
        }
    }
    Ok(None)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
