//! Text input widget
//!
//! A single-line text field with a char-aware cursor, placeholder text and an
//! inline validation error rendered underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input with label, placeholder and error line
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, counted in chars (not bytes)
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder shown while empty
    pub placeholder: String,
    /// Field label
    pub label: String,
    /// Validation error shown under the field
    pub error: Option<String>,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content, placing the cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self
    }

    /// Byte offset of the cursor's char position
    fn cursor_byte(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.cursor_byte();
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.cursor_byte();
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let at = self.cursor_byte();
            self.content.remove(at);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as u16 + 2
        };

        if !self.label.is_empty() {
            let label_style = if self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let label_line = Line::from(vec![
                Span::styled(self.label.clone(), label_style),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width);
        }

        let input_start = area.x + label_width;
        let (display_text, text_style) = if self.content.is_empty() {
            (
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            )
        } else if self.focused {
            (self.content.clone(), Style::default().fg(Color::White))
        } else {
            (self.content.clone(), Style::default().fg(Color::Gray))
        };
        buf.set_string(input_start, area.y, &display_text, text_style);

        if self.focused {
            let cursor_x = input_start + self.cursor as u16;
            if cursor_x < area.x + area.width {
                let cursor_char = self
                    .content
                    .chars()
                    .nth(self.cursor)
                    .unwrap_or(' ')
                    .to_string();
                buf.set_string(
                    cursor_x,
                    area.y,
                    cursor_char,
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }

        // Error line under the field
        if let Some(error) = &self.error {
            if area.height > 1 {
                buf.set_string(
                    input_start,
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

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = TextInput::new();
        for c in "Ана".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "Ана");
        assert_eq!(input.cursor, 3);

        input.backspace();
        assert_eq!(input.value(), "Ан");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new().content("Пп");
        input.move_left();
        input.insert('о');
        assert_eq!(input.value(), "Поп");
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut input = TextInput::new().content("ab");
        input.move_end();
        input.move_right();
        assert_eq!(input.cursor, 2);
        input.move_start();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.backspace();
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::new().content("abc");
        input.move_start();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_end();
        input.delete();
        assert_eq!(input.value(), "bc");
    }
}
