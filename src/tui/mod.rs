//! Terminal User Interface module
//!
//! The full-screen wizard UI: one screen per step, modal dialogs for the
//! submission outcome, and an event loop fed by a reader thread plus HTTP
//! worker threads.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Steps
pub mod steps;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
