//! Layout definitions for the TUI
//!
//! The wizard screen splits into a progress header, the step body, and a
//! one-line status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the wizard screen
pub struct WizardLayout {
    /// Progress header (step titles)
    pub header: Rect,
    /// Step body (the form)
    pub body: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl WizardLayout {
    /// Calculate layout from the available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress header
                Constraint::Min(6),    // Step body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            body: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// A centered rect of fixed size within `r`
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
