//! Bounded slider widget
//!
//! A horizontal range control for the loan parameters: value readout, a
//! track with a handle, and fixed marks under the track. Editing can never
//! leave the configured bounds.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A clamped numeric slider with marks
#[derive(Debug, Clone)]
pub struct SliderInput {
    /// Field label
    pub label: String,
    /// Inclusive lower bound
    pub min: u32,
    /// Inclusive upper bound
    pub max: u32,
    /// Increment per keypress
    pub step: u32,
    /// Current value
    pub value: u32,
    /// Prefix for the readout (e.g. "$")
    pub prefix: &'static str,
    /// Suffix for the readout (e.g. " дней")
    pub suffix: &'static str,
    /// Values annotated under the track
    pub marks: Vec<u32>,
    /// Whether the control is focused
    pub focused: bool,
    /// Validation error shown under the control
    pub error: Option<String>,
}

impl SliderInput {
    /// Create a slider over `[min, max]` starting at `min`
    pub fn new(label: impl Into<String>, min: u32, max: u32, step: u32) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            step,
            value: min,
            prefix: "",
            suffix: "",
            marks: Vec::new(),
            focused: false,
            error: None,
        }
    }

    /// Set the readout prefix
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the readout suffix
    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Set the mark values
    pub fn marks(mut self, marks: Vec<u32>) -> Self {
        self.marks = marks;
        self
    }

    /// Set the current value, clamped to the bounds
    pub fn set_value(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Step up, saturating at the upper bound
    pub fn increase(&mut self) {
        self.set_value(self.value.saturating_add(self.step));
    }

    /// Step down, saturating at the lower bound
    pub fn decrease(&mut self) {
        self.set_value(self.value.saturating_sub(self.step));
    }

    /// Jump to the lower bound
    pub fn to_min(&mut self) {
        self.value = self.min;
    }

    /// Jump to the upper bound
    pub fn to_max(&mut self) {
        self.value = self.max;
    }

    /// Formatted value readout
    pub fn readout(&self) -> String {
        format!("{}{}{}", self.prefix, self.value, self.suffix)
    }
}

impl Widget for &SliderInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        // Line 1: label and readout
        let header = Line::from(vec![
            Span::styled(self.label.clone(), label_style),
            Span::raw("  "),
            Span::styled(
                self.readout(),
                Style::default().fg(Color::White),
            ),
        ]);
        buf.set_line(area.x, area.y, &header, area.width);

        if area.height < 2 || area.width < 4 {
            return;
        }

        // Line 2: track with handle
        let track_width = area.width.saturating_sub(2) as usize;
        let span = (self.max - self.min) as usize;
        let pos = if span == 0 || track_width <= 1 {
            0
        } else {
            (self.value - self.min) as usize * (track_width - 1) / span
        };

        let track_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut track = String::with_capacity(track_width * 3);
        for i in 0..track_width {
            track.push(if i < pos { '━' } else if i == pos { '●' } else { '─' });
        }
        buf.set_string(area.x + 1, area.y + 1, &track, track_style);

        // Line 3: marks spread along the track
        if area.height >= 3 && !self.marks.is_empty() {
            for mark in &self.marks {
                let mark = (*mark).clamp(self.min, self.max);
                let offset = if span == 0 || track_width <= 1 {
                    0
                } else {
                    (mark - self.min) as usize * (track_width - 1) / span
                };
                let text = format!("{}{}", self.prefix, mark);
                let x = (area.x + 1 + offset as u16)
                    .min(area.x + area.width.saturating_sub(text.len() as u16));
                buf.set_string(x, area.y + 2, &text, Style::default().fg(Color::DarkGray));
            }
        }

        // Error line under the marks
        if let Some(error) = &self.error {
            if area.height >= 4 {
                buf.set_string(
                    area.x + 1,
                    area.y + 3,
                    error,
                    Style::default().fg(Color::Red),
                );
            }
        }
    }
}
