//! Option select widget
//!
//! A horizontal picker cycling through a fixed option list with Left/Right.
//! Shows a prompt until a choice is made; used for gender and workplace.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// One selectable entry: stored value plus display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub value: String,
    pub label: String,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A select control with a prompt and an inline error line
#[derive(Debug, Clone, Default)]
pub struct SelectInput {
    /// Available options
    pub items: Vec<SelectItem>,
    /// Index of the chosen option, if any
    pub selected: Option<usize>,
    /// Whether the control is focused
    pub focused: bool,
    /// Prompt shown before a choice is made
    pub prompt: String,
    /// Field label
    pub label: String,
    /// Validation error shown under the field
    pub error: Option<String>,
}

impl SelectInput {
    /// Create a new select control
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the option list
    pub fn items(mut self, items: Vec<SelectItem>) -> Self {
        self.items = items;
        self
    }

    /// Replace the option list, keeping the selection when its value is
    /// still present
    pub fn set_items(&mut self, items: Vec<SelectItem>) {
        let current = self.value().map(String::from);
        self.items = items;
        self.selected = current
            .and_then(|value| self.items.iter().position(|item| item.value == value));
    }

    /// Select the option carrying `value`, if present
    pub fn select_value(&mut self, value: &str) {
        if let Some(idx) = self.items.iter().position(|item| item.value == value) {
            self.selected = Some(idx);
        }
    }

    /// Move to the next option (first when nothing is selected yet)
    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1) % self.items.len(),
            None => 0,
        });
    }

    /// Move to the previous option (last when nothing is selected yet)
    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(idx) => idx - 1,
        });
    }

    /// The chosen value, if any
    pub fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.items.get(idx))
            .map(|item| item.value.as_str())
    }

    /// The chosen label, if any
    pub fn selected_label(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.items.get(idx))
            .map(|item| item.label.as_str())
    }
}

impl Widget for &SelectInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let (text, text_style) = match self.selected_label() {
            Some(label) => (
                label.to_string(),
                if self.focused {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
            None => (self.prompt.clone(), Style::default().fg(Color::DarkGray)),
        };

        let mut spans = vec![
            Span::styled(self.label.clone(), label_style),
            Span::raw(": "),
        ];
        if self.focused {
            spans.push(Span::styled("◂ ", Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(text, text_style));
            spans.push(Span::styled(" ▸", Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::styled(text, text_style));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(error) = &self.error {
            if area.height > 1 {
                let indent = self.label.chars().count() as u16 + 2;
                buf.set_string(
                    area.x + indent,
                    area.y + 1,
                    error,
                    Style::default().fg(Color::Red),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender_select() -> SelectInput {
        SelectInput::new()
            .label("Пол")
            .prompt("Выберите пол")
            .items(vec![
                SelectItem::new("Мужской", "Мужской"),
                SelectItem::new("Женский", "Женский"),
            ])
    }

    #[test]
    fn test_starts_without_selection() {
        let select = gender_select();
        assert_eq!(select.value(), None);
    }

    #[test]
    fn test_next_wraps_around() {
        let mut select = gender_select();
        select.next();
        assert_eq!(select.value(), Some("Мужской"));
        select.next();
        assert_eq!(select.value(), Some("Женский"));
        select.next();
        assert_eq!(select.value(), Some("Мужской"));
    }

    #[test]
    fn test_prev_from_empty_picks_last() {
        let mut select = gender_select();
        select.prev();
        assert_eq!(select.value(), Some("Женский"));
    }

    #[test]
    fn test_set_items_preserves_selection_by_value() {
        let mut select = SelectInput::new().items(vec![
            SelectItem::new("a", "A"),
            SelectItem::new("b", "B"),
        ]);
        select.select_value("b");
        select.set_items(vec![
            SelectItem::new("b", "B"),
            SelectItem::new("c", "C"),
        ]);
        assert_eq!(select.value(), Some("b"));

        select.set_items(vec![SelectItem::new("x", "X")]);
        assert_eq!(select.value(), None);
    }

    #[test]
    fn test_empty_items_never_select() {
        let mut select = SelectInput::new();
        select.next();
        select.prev();
        assert_eq!(select.value(), None);
    }
}
