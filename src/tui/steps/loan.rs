//! Step 3: loan parameters
//!
//! Two sliders with fixed bounds and marks. Interactive edits clamp at the
//! bounds; the schema re-checks the range on submit so values merged from
//! shared state are validated too.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::schema::{
    self, LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN, LOAN_TERM_MAX, LOAN_TERM_MIN,
};
use crate::form::{FormData, FormPatch};
use crate::tui::widgets::SliderInput;

/// Which slider is currently focused on step 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanField {
    #[default]
    Amount,
    Term,
}

impl LoanField {
    pub fn next(self) -> Self {
        match self {
            Self::Amount => Self::Term,
            Self::Term => Self::Amount,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Form state for step 3
#[derive(Debug, Clone)]
pub struct LoanForm {
    pub focused: LoanField,
    pub amount: SliderInput,
    pub term: SliderInput,
}

impl LoanForm {
    /// Build the form, prefilled from shared state (bounds' minimums when
    /// nothing is stored yet)
    pub fn from_form(data: &FormData) -> Self {
        let mut amount = SliderInput::new("Сумма займа", LOAN_AMOUNT_MIN, LOAN_AMOUNT_MAX, 100)
            .prefix("$")
            .marks(vec![200, 400, 600, 800, 1000]);
        if let Some(value) = data.loan_amount {
            amount.set_value(value);
        }

        let mut term = SliderInput::new("Срок займа", LOAN_TERM_MIN, LOAN_TERM_MAX, 1)
            .suffix(" дней")
            .marks(vec![10, 15, 20, 25, 30]);
        if let Some(value) = data.loan_term {
            term.set_value(value);
        }

        let mut form = Self {
            focused: LoanField::Amount,
            amount,
            term,
        };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        self.amount.focused = self.focused == LoanField::Amount;
        self.term.focused = self.focused == LoanField::Term;
    }

    /// Move focus to the other slider
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
        self.sync_focus();
    }

    /// Move focus to the other slider
    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
        self.sync_focus();
    }

    /// The focused slider
    pub fn focused_slider(&mut self) -> &mut SliderInput {
        match self.focused {
            LoanField::Amount => &mut self.amount,
            LoanField::Term => &mut self.term,
        }
    }

    /// Validate on submit
    pub fn validate(&mut self) -> Option<FormPatch> {
        match schema::validate_loan(self.amount.value as i64, self.term.value as i64) {
            Ok(patch) => {
                self.amount.error = None;
                self.term.error = None;
                Some(patch)
            }
            Err(errors) => {
                self.amount.error = errors.get(schema::fields::LOAN_AMOUNT).map(String::from);
                self.term.error = errors.get(schema::fields::LOAN_TERM).map(String::from);
                None
            }
        }
    }

    /// Current slider values as a patch (sliders are always in range)
    pub fn patch(&self) -> FormPatch {
        FormPatch::loan(self.amount.value, self.term.value)
    }
}

/// Render step 3
pub fn render(frame: &mut Frame, form: &LoanForm, submitting: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Параметры займа ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // amount slider
            Constraint::Length(1),
            Constraint::Length(4), // term slider
            Constraint::Length(1),
            Constraint::Length(1), // submit hint / progress
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.amount, rows[0]);
    frame.render_widget(&form.term, rows[2]);

    if submitting {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Отправляем заявку...",
                Style::default().fg(Color::Yellow),
            ))),
            rows[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_lower_bounds() {
        let form = LoanForm::from_form(&FormData::default());
        assert_eq!(form.amount.value, 200);
        assert_eq!(form.term.value, 10);
    }

    #[test]
    fn test_prefill_clamps_stored_values() {
        let mut data = FormData::default();
        data.loan_amount = Some(5000);
        data.loan_term = Some(3);

        let form = LoanForm::from_form(&data);
        assert_eq!(form.amount.value, 1000);
        assert_eq!(form.term.value, 10);
    }

    #[test]
    fn test_validate_passes_for_slider_values() {
        let mut form = LoanForm::from_form(&FormData::default());
        form.amount.set_value(500);
        form.term.set_value(15);

        let patch = form.validate().expect("sliders stay in range");
        assert_eq!(patch.loan_amount, Some(500));
        assert_eq!(patch.loan_term, Some(15));
    }

    #[test]
    fn test_focus_toggles_between_sliders() {
        let mut form = LoanForm::from_form(&FormData::default());
        assert_eq!(form.focused, LoanField::Amount);
        form.focus_next();
        assert_eq!(form.focused, LoanField::Term);
        assert!(form.term.focused && !form.amount.focused);
    }
}
