//! Step 1: personal data
//!
//! Phone, first name, last name and gender. Validation runs on submit; field
//! errors render inline and clear once the field re-validates.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::form::{schema, FormData, FormPatch, Gender};
use crate::tui::widgets::{select::SelectItem, SelectInput, TextInput};

/// Which field is currently focused on step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonalField {
    #[default]
    Phone,
    FirstName,
    LastName,
    Gender,
}

impl PersonalField {
    /// Next field for Tab navigation
    pub fn next(self) -> Self {
        match self {
            Self::Phone => Self::FirstName,
            Self::FirstName => Self::LastName,
            Self::LastName => Self::Gender,
            Self::Gender => Self::Phone,
        }
    }

    /// Previous field for Shift+Tab navigation
    pub fn prev(self) -> Self {
        match self {
            Self::Phone => Self::Gender,
            Self::FirstName => Self::Phone,
            Self::LastName => Self::FirstName,
            Self::Gender => Self::LastName,
        }
    }
}

/// Form state for step 1
#[derive(Debug, Clone)]
pub struct PersonalForm {
    pub focused: PersonalField,
    pub phone: TextInput,
    pub first_name: TextInput,
    pub last_name: TextInput,
    pub gender: SelectInput,
}

impl PersonalForm {
    /// Build the form, prefilled from shared state
    pub fn from_form(data: &FormData) -> Self {
        let mut gender = SelectInput::new()
            .label("Пол")
            .prompt("Выберите пол")
            .items(
                Gender::ALL
                    .iter()
                    .map(|g| SelectItem::new(g.label(), g.label()))
                    .collect(),
            );
        if let Some(g) = data.gender {
            gender.select_value(g.label());
        }

        let mut form = Self {
            focused: PersonalField::Phone,
            phone: TextInput::new()
                .label("Телефон")
                .placeholder("0XXX XXX XXX")
                .content(data.phone.clone().unwrap_or_default()),
            first_name: TextInput::new()
                .label("Имя")
                .content(data.first_name.clone().unwrap_or_default()),
            last_name: TextInput::new()
                .label("Фамилия")
                .content(data.last_name.clone().unwrap_or_default()),
            gender,
        };
        form.sync_focus();
        form
    }

    fn sync_focus(&mut self) {
        self.phone.focused = self.focused == PersonalField::Phone;
        self.first_name.focused = self.focused == PersonalField::FirstName;
        self.last_name.focused = self.focused == PersonalField::LastName;
        self.gender.focused = self.focused == PersonalField::Gender;
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

    /// The focused text input, if the focused field is one
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            PersonalField::Phone => Some(&mut self.phone),
            PersonalField::FirstName => Some(&mut self.first_name),
            PersonalField::LastName => Some(&mut self.last_name),
            PersonalField::Gender => None,
        }
    }

    /// Validate on submit; errors stick to their fields, success yields the
    /// patch to merge
    pub fn validate(&mut self) -> Option<FormPatch> {
        let gender = self.gender.value().and_then(Gender::from_label);
        let result = schema::validate_personal(
            self.phone.value(),
            self.first_name.value(),
            self.last_name.value(),
            gender,
        );

        match result {
            Ok(patch) => {
                self.phone.error = None;
                self.first_name.error = None;
                self.last_name.error = None;
                self.gender.error = None;
                Some(patch)
            }
            Err(errors) => {
                self.phone.error = errors.get(schema::fields::PHONE).map(String::from);
                self.first_name.error =
                    errors.get(schema::fields::FIRST_NAME).map(String::from);
                self.last_name.error = errors.get(schema::fields::LAST_NAME).map(String::from);
                self.gender.error = errors.get(schema::fields::GENDER).map(String::from);
                None
            }
        }
    }
}

/// Render step 1
pub fn render(frame: &mut Frame, form: &PersonalForm, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Личные данные ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // phone + error
            Constraint::Length(2), // first name + error
            Constraint::Length(2), // last name + error
            Constraint::Length(2), // gender + error
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.phone, rows[0]);
    frame.render_widget(&form.first_name, rows[1]);
    frame.render_widget(&form.last_name, rows[2]);
    frame.render_widget(&form.gender, rows[3]);
}
