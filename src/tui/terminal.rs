//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use std::io::{self, Stdout};
use std::panic;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::catalog::CatalogClient;
use crate::config::Settings;
use crate::wizard::Step;

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_event;
use super::steps;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wizard TUI, entering at `start` (guarded)
pub fn run_tui(settings: Settings, start: Step) -> Result<()> {
    let client = CatalogClient::new(&settings)?;

    let mut terminal = init_terminal()?;

    let events = EventHandler::default();
    let mut app = App::new(settings, client, events.sender(), start);

    // Main event loop
    loop {
        terminal.draw(|frame| {
            steps::render(frame, &mut app);
        })?;

        match events.next()? {
            Event::Tick => {}
            event => {
                handle_event(&mut app, event)?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    restore_terminal()?;

    Ok(())
}
