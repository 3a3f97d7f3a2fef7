//! Error dialog
//!
//! Blocking modal for remote failures, with recovery suggestions per error
//! kind. Validation errors never land here; they render inline next to
//! their field.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::WizardError;
use crate::tui::layout::centered_rect_fixed;

/// Presentable error details with recovery suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Dialog title
    pub title: String,
    /// The user-facing message
    pub details: String,
    /// Suggested recovery actions
    pub suggestions: Vec<String>,
}

impl ErrorInfo {
    /// Build dialog content from a wizard error
    pub fn from_error(error: &WizardError) -> Self {
        match error {
            WizardError::Network(_) => Self {
                title: "Ошибка сети".to_string(),
                details: error.to_string(),
                suggestions: vec![
                    "Проверьте подключение к интернету".to_string(),
                    "Данные формы сохранены, попробуйте позже".to_string(),
                ],
            },
            WizardError::Http { .. } => Self {
                title: "Ошибка отправки".to_string(),
                details: error.to_string(),
                suggestions: vec![
                    "Данные формы сохранены, попробуйте позже".to_string(),
                ],
            },
            WizardError::Json(msg) => Self {
                title: "Некорректный ответ сервиса".to_string(),
                details: msg.clone(),
                suggestions: vec!["Попробуйте ещё раз позже".to_string()],
            },
            other => Self {
                title: "Ошибка".to_string(),
                details: other.to_string(),
                suggestions: Vec::new(),
            },
        }
    }
}

/// Render the error dialog
pub fn render(frame: &mut Frame, info: &ErrorInfo) {
    let height = 6 + info.suggestions.len() as u16;
    let area = centered_rect_fixed(60, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", info.title))
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            info.details.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];
    for suggestion in &info.suggestions {
        lines.push(Line::from(Span::styled(
            format!("• {}", suggestion),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Red)),
        Span::raw(" Закрыть"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_info() {
        let info = ErrorInfo::from_error(&WizardError::Network("timed out".into()));
        assert_eq!(info.title, "Ошибка сети");
        assert_eq!(info.details, "Ошибка сети: timed out");
        assert_eq!(info.suggestions.len(), 2);
    }

    #[test]
    fn test_http_error_info_carries_status_and_body() {
        let err = WizardError::Http {
            status: 503,
            body: "Service Unavailable".into(),
        };
        let info = ErrorInfo::from_error(&err);
        assert_eq!(info.details, "Ошибка отправки: 503 Service Unavailable");
    }
}
