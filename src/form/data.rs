//! Shared form data accumulated across wizard steps
//!
//! All fields start empty and are filled in by shallow merges as each step
//! submits. The record lives only for the process lifetime; nothing is
//! persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Applicant gender, presented with its localized label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Мужской")]
    Male,
    #[serde(rename = "Женский")]
    Female,
}

impl Gender {
    /// All selectable values, in display order
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// The localized label shown in the select control
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Мужской",
            Gender::Female => "Женский",
        }
    }

    /// Parse a localized label back into a gender
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Мужской" => Some(Gender::Male),
            "Женский" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The accumulated form record shared across all three steps
///
/// Partial while the wizard is in progress; fully populated only after the
/// third step submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    // Step 1
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,

    // Step 2
    pub workplace: Option<String>,
    pub address: Option<String>,

    // Step 3
    pub loan_amount: Option<u32>,
    pub loan_term: Option<u32>,
}

impl FormData {
    /// Shallow-merge a patch into the record
    ///
    /// Only the `Some` fields of the patch are written; later writes for the
    /// same field overwrite earlier ones. There is no way to clear a field.
    pub fn merge(&mut self, patch: FormPatch) {
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
        }
        if let Some(workplace) = patch.workplace {
            self.workplace = Some(workplace);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(loan_amount) = patch.loan_amount {
            self.loan_amount = Some(loan_amount);
        }
        if let Some(loan_term) = patch.loan_term {
            self.loan_term = Some(loan_term);
        }
    }

    /// The submission title: "firstName lastName", trimmed
    pub fn submission_title(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// The success-dialog message shown after the remote submission succeeds
    pub fn approval_message(&self, amount: u32, term: u32) -> String {
        format!(
            "Поздравляем, {} {}. Вам одобрена ${} на {} дней.",
            self.last_name.as_deref().unwrap_or(""),
            self.first_name.as_deref().unwrap_or(""),
            amount,
            term
        )
    }
}

/// A shallow-merge patch: the subset of fields one step contributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPatch {
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub workplace: Option<String>,
    pub address: Option<String>,
    pub loan_amount: Option<u32>,
    pub loan_term: Option<u32>,
}

impl FormPatch {
    /// Patch carrying the four step-1 fields
    pub fn personal(phone: String, first_name: String, last_name: String, gender: Gender) -> Self {
        Self {
            phone: Some(phone),
            first_name: Some(first_name),
            last_name: Some(last_name),
            gender: Some(gender),
            ..Self::default()
        }
    }

    /// Patch carrying the two step-2 fields
    pub fn employment(workplace: String, address: String) -> Self {
        Self {
            workplace: Some(workplace),
            address: Some(address),
            ..Self::default()
        }
    }

    /// Patch carrying the two step-3 fields
    pub fn loan(amount: u32, term: u32) -> Self {
        Self {
            loan_amount: Some(amount),
            loan_term: Some(term),
            ..Self::default()
        }
    }
}
