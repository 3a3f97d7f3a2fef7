//! Step 2: address and workplace
//!
//! The workplace select is fed from the category catalog; while the list is
//! loading or failed the control is withheld and submission stays blocked.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::CategoryOption;
use crate::form::{schema, FormData, FormPatch};
use crate::tui::app::CategoryLoad;
use crate::tui::widgets::{select::SelectItem, SelectInput, TextInput};

/// Which field is currently focused on step 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmploymentField {
    #[default]
    Workplace,
    Address,
}

impl EmploymentField {
    pub fn next(self) -> Self {
        match self {
            Self::Workplace => Self::Address,
            Self::Address => Self::Workplace,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Form state for step 2
#[derive(Debug, Clone)]
pub struct EmploymentForm {
    pub focused: EmploymentField,
    pub workplace: SelectInput,
    pub address: TextInput,
}

impl EmploymentForm {
    /// Build the form, prefilled from shared state
    pub fn from_form(data: &FormData) -> Self {
        let mut form = Self {
            focused: EmploymentField::Workplace,
            workplace: SelectInput::new()
                .label("Место работы")
                .prompt("Выберите категорию"),
            address: TextInput::new()
                .label("Адрес проживания")
                .placeholder("Улица, дом, квартира")
                .content(data.address.clone().unwrap_or_default()),
        };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        self.workplace.focused = self.focused == EmploymentField::Workplace;
        self.address.focused = self.focused == EmploymentField::Address;
    }

    /// Move focus to the next field
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
        self.sync_focus();
    }

    /// Move focus to the previous field
    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
        self.sync_focus();
    }

    /// Load the fetched categories into the select, restoring the stored
    /// workplace selection when it is still available
    pub fn set_categories(&mut self, categories: &[CategoryOption], stored: Option<&str>) {
        self.workplace.set_items(
            categories
                .iter()
                .map(|c| SelectItem::new(c.value.clone(), c.label.clone()))
                .collect(),
        );
        if self.workplace.selected.is_none() {
            if let Some(value) = stored {
                self.workplace.select_value(value);
            }
        }
    }

    /// Validate on submit
    pub fn validate(&mut self) -> Option<FormPatch> {
        let workplace = self.workplace.value().unwrap_or_default();
        match schema::validate_employment(workplace, self.address.value()) {
            Ok(patch) => {
                self.workplace.error = None;
                self.address.error = None;
                Some(patch)
            }
            Err(errors) => {
                self.workplace.error = errors.get(schema::fields::WORKPLACE).map(String::from);
                self.address.error = errors.get(schema::fields::ADDRESS).map(String::from);
                None
            }
        }
    }

    /// Current values as a patch, without validation
    ///
    /// Used when navigating back so typed input survives the revisit, the
    /// same way the forward submit would save it. An empty select emits no
    /// workplace at all: while the category list is loading or failed the
    /// control holds nothing, and merging an empty value would erase a
    /// previously stored workplace. Guards still run the validating
    /// predicates, so this can never unlock a later step.
    pub fn unvalidated_patch(&self) -> FormPatch {
        FormPatch {
            workplace: self.workplace.value().map(str::to_string),
            address: Some(self.address.value().to_string()),
            ..FormPatch::default()
        }
    }
}

/// Render step 2
pub fn render(
    frame: &mut Frame,
    form: &EmploymentForm,
    categories: &CategoryLoad,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Адрес и место работы ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // workplace select or banner
            Constraint::Length(2), // address + error
            Constraint::Min(0),
        ])
        .split(inner);

    // The select control is withheld while loading or failed
    match categories {
        CategoryLoad::Loading => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Загружаем категории...",
                    Style::default().fg(Color::Yellow),
                ))),
                rows[0],
            );
        }
        CategoryLoad::Failed(message) => {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(message.clone(), Style::default().fg(Color::Red)),
                    Span::raw("  "),
                    Span::styled("[Ctrl+R]", Style::default().fg(Color::Yellow)),
                    Span::raw(" Повторить"),
                ])),
                rows[0],
            );
        }
        CategoryLoad::Ready(_) => {
            frame.render_widget(&form.workplace, rows[0]);
        }
    }

    frame.render_widget(&form.address, rows[1]);
}
