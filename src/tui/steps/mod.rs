//! Wizard steps: per-step form state and rendering
//!
//! Each step owns its input widgets, validates them on submit through the
//! form schema, and yields the patch merged into shared state.

pub mod employment;
pub mod loan;
pub mod personal;

pub use employment::EmploymentForm;
pub use loan::LoanForm;
pub use personal::PersonalForm;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::wizard::Step;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::WizardLayout;

/// Render the entire wizard screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = WizardLayout::new(frame.area());

    render_progress(frame, app.step, layout.header);

    match app.step {
        Step::Personal => personal::render(frame, &app.personal, layout.body),
        Step::Employment => {
            employment::render(frame, &app.employment, &app.categories, layout.body)
        }
        Step::Loan => loan::render(frame, &app.loan, app.submitting, layout.body),
    }

    render_status_bar(frame, app, layout.status_bar);

    match &app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Confirm(message) => dialogs::confirm::render(frame, message),
        ActiveDialog::Error(info) => dialogs::error::render(frame, info),
    }
}

/// Render the progress header with the three step titles
fn render_progress(frame: &mut Frame, active: Step, area: Rect) {
    let mut spans = Vec::new();
    for (i, step) in Step::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
        }
        let style = if step == active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if step.number() < active.number() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{}. {}", step.number(), step.title()),
            style,
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Заявка на займ "));
    frame.render_widget(paragraph, area);
}

/// Render the bottom status bar: transient message on the left, key hints on
/// the right
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.step {
        Step::Personal => "Tab: поля  Enter: Далее  Ctrl+C: выход",
        Step::Employment => "Tab: поля  Enter: Далее  Esc: Назад  Ctrl+R: обновить категории",
        Step::Loan => "←/→: значение  Enter: Подать заявку  Esc: Назад",
    };

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
