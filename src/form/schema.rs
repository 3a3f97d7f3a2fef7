//! Declarative per-step validation rules
//!
//! Each step owns a small rule table mapping field names to their constraint
//! (required / pattern / numeric range) and the localized message shown when
//! the constraint fails. Validation runs at submission time and produces
//! field-scoped errors; a successful validation yields the [`FormPatch`] that
//! the step merges into shared state.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::form::data::{FormPatch, Gender};

/// Field identifiers, matching the wire names of the submission payload
pub mod fields {
    pub const PHONE: &str = "phone";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const GENDER: &str = "gender";
    pub const WORKPLACE: &str = "workplace";
    pub const ADDRESS: &str = "address";
    pub const LOAN_AMOUNT: &str = "loanAmount";
    pub const LOAN_TERM: &str = "loanTerm";
}

/// Loan amount bounds in dollars
pub const LOAN_AMOUNT_MIN: u32 = 200;
pub const LOAN_AMOUNT_MAX: u32 = 1000;

/// Loan term bounds in days
pub const LOAN_TERM_MIN: u32 = 10;
pub const LOAN_TERM_MAX: u32 = 30;

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0\d{3} \d{3} \d{3}$").expect("phone regex"))
}

fn name_regex() -> &'static Regex {
    // Unicode letters, combining marks, apostrophe, hyphen and space
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\p{L}\p{M}' \-]+$").expect("name regex"))
}

/// Constraint attached to one field
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Non-empty after trimming
    Required,
    /// Non-empty and matching a pattern; `pattern_message` covers the
    /// pattern failure, the rule's own message covers emptiness
    Pattern {
        pattern: fn() -> &'static Regex,
        pattern_message: &'static str,
    },
    /// Inclusive numeric range with distinct messages per bound
    Range {
        min: u32,
        max: u32,
        max_message: &'static str,
    },
}

/// One entry of a step's rule table
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraint: Constraint,
    pub message: &'static str,
}

/// The rule table for one wizard step
#[derive(Debug, Clone, Copy)]
pub struct StepSchema {
    rules: &'static [FieldRule],
}

impl StepSchema {
    /// Rules for step 1 (personal data)
    pub fn personal() -> Self {
        static RULES: [FieldRule; 4] = [
            FieldRule {
                field: fields::PHONE,
                constraint: Constraint::Pattern {
                    pattern: phone_regex,
                    pattern_message: "Формат: 0XXX XXX XXX",
                },
                message: "Формат: 0XXX XXX XXX",
            },
            FieldRule {
                field: fields::FIRST_NAME,
                constraint: Constraint::Pattern {
                    pattern: name_regex,
                    pattern_message: "Введите буквы",
                },
                message: "Обязательное поле",
            },
            FieldRule {
                field: fields::LAST_NAME,
                constraint: Constraint::Pattern {
                    pattern: name_regex,
                    pattern_message: "Введите буквы",
                },
                message: "Обязательное поле",
            },
            FieldRule {
                field: fields::GENDER,
                constraint: Constraint::Required,
                message: "Выберите пол",
            },
        ];
        Self { rules: &RULES }
    }

    /// Rules for step 2 (address and employment)
    pub fn employment() -> Self {
        static RULES: [FieldRule; 2] = [
            FieldRule {
                field: fields::WORKPLACE,
                constraint: Constraint::Required,
                message: "Выберите место работы",
            },
            FieldRule {
                field: fields::ADDRESS,
                constraint: Constraint::Required,
                message: "Обязательное поле",
            },
        ];
        Self { rules: &RULES }
    }

    /// Rules for step 3 (loan parameters)
    pub fn loan() -> Self {
        static RULES: [FieldRule; 2] = [
            FieldRule {
                field: fields::LOAN_AMOUNT,
                constraint: Constraint::Range {
                    min: LOAN_AMOUNT_MIN,
                    max: LOAN_AMOUNT_MAX,
                    max_message: "Максимум $1000",
                },
                message: "Минимум $200",
            },
            FieldRule {
                field: fields::LOAN_TERM,
                constraint: Constraint::Range {
                    min: LOAN_TERM_MIN,
                    max: LOAN_TERM_MAX,
                    max_message: "Максимум 30 дней",
                },
                message: "Минимум 10 дней",
            },
        ];
        Self { rules: &RULES }
    }

    /// Validate one text field against its rule, returning the error message
    /// on failure
    pub fn check_text(&self, field: &str, value: &str) -> Option<String> {
        let rule = self.rules.iter().find(|r| r.field == field)?;
        match rule.constraint {
            Constraint::Required => {
                if value.trim().is_empty() {
                    Some(rule.message.to_string())
                } else {
                    None
                }
            }
            Constraint::Pattern {
                pattern,
                pattern_message,
            } => {
                if value.is_empty() {
                    Some(rule.message.to_string())
                } else if !pattern().is_match(value) {
                    Some(pattern_message.to_string())
                } else {
                    None
                }
            }
            Constraint::Range { .. } => None,
        }
    }

    /// Validate one numeric field against its range rule
    pub fn check_range(&self, field: &str, value: i64) -> Option<String> {
        let rule = self.rules.iter().find(|r| r.field == field)?;
        if let Constraint::Range {
            min,
            max,
            max_message,
        } = rule.constraint
        {
            if value < min as i64 {
                return Some(rule.message.to_string());
            }
            if value > max as i64 {
                return Some(max_message.to_string());
            }
        }
        None
    }
}

/// Field-scoped validation errors for one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    map: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn insert(&mut self, field: &'static str, message: String) {
        self.map.insert(field, message);
    }

    /// The message for one field, if it failed validation
    pub fn get(&self, field: &str) -> Option<&str> {
        self.map.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

/// Collapse internal whitespace runs to single spaces and trim
///
/// Digits and punctuation are deliberately kept so the name pattern can
/// report "Введите буквы" instead of silently dropping them.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate step 1 input, producing the patch to merge on success
pub fn validate_personal(
    phone: &str,
    first_name: &str,
    last_name: &str,
    gender: Option<Gender>,
) -> Result<FormPatch, FieldErrors> {
    let schema = StepSchema::personal();
    let first_name = normalize_name(first_name);
    let last_name = normalize_name(last_name);

    let mut errors = FieldErrors::default();
    if let Some(msg) = schema.check_text(fields::PHONE, phone) {
        errors.insert(fields::PHONE, msg);
    }
    if let Some(msg) = schema.check_text(fields::FIRST_NAME, &first_name) {
        errors.insert(fields::FIRST_NAME, msg);
    }
    if let Some(msg) = schema.check_text(fields::LAST_NAME, &last_name) {
        errors.insert(fields::LAST_NAME, msg);
    }
    if gender.is_none() {
        errors.insert(fields::GENDER, "Выберите пол".to_string());
    }

    match (errors.is_empty(), gender) {
        (true, Some(gender)) => Ok(FormPatch::personal(
            phone.to_string(),
            first_name,
            last_name,
            gender,
        )),
        _ => Err(errors),
    }
}

/// Validate step 2 input
pub fn validate_employment(workplace: &str, address: &str) -> Result<FormPatch, FieldErrors> {
    let schema = StepSchema::employment();

    let mut errors = FieldErrors::default();
    if let Some(msg) = schema.check_text(fields::WORKPLACE, workplace) {
        errors.insert(fields::WORKPLACE, msg);
    }
    if let Some(msg) = schema.check_text(fields::ADDRESS, address) {
        errors.insert(fields::ADDRESS, msg);
    }

    if errors.is_empty() {
        Ok(FormPatch::employment(
            workplace.to_string(),
            address.trim().to_string(),
        ))
    } else {
        Err(errors)
    }
}

/// Validate step 3 input
pub fn validate_loan(amount: i64, term: i64) -> Result<FormPatch, FieldErrors> {
    let schema = StepSchema::loan();

    let mut errors = FieldErrors::default();
    if let Some(msg) = schema.check_range(fields::LOAN_AMOUNT, amount) {
        errors.insert(fields::LOAN_AMOUNT, msg);
    }
    if let Some(msg) = schema.check_range(fields::LOAN_TERM, term) {
        errors.insert(fields::LOAN_TERM, msg);
    }

    if errors.is_empty() {
        Ok(FormPatch::loan(amount as u32, term as u32))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern_accepts_digit_groups() {
        assert!(validate_personal("0123 456 789", "Ana", "Pop", Some(Gender::Male)).is_ok());
    }

    #[test]
    fn test_phone_pattern_rejects_other_shapes() {
        for bad in ["", "0123456789", "1123 456 789", "0123 456 78", "0123-456-789"] {
            let errors =
                validate_personal(bad, "Ana", "Pop", Some(Gender::Male)).unwrap_err();
            assert_eq!(errors.get(fields::PHONE), Some("Формат: 0XXX XXX XXX"));
        }
    }

    #[test]
    fn test_empty_name_is_required_field() {
        let errors = validate_personal("0123 456 789", "", "Pop", Some(Gender::Male)).unwrap_err();
        assert_eq!(errors.get(fields::FIRST_NAME), Some("Обязательное поле"));
    }

    #[test]
    fn test_name_with_digits_asks_for_letters() {
        let errors =
            validate_personal("0123 456 789", "Ana2", "Pop", Some(Gender::Male)).unwrap_err();
        assert_eq!(errors.get(fields::FIRST_NAME), Some("Введите буквы"));
    }

    #[test]
    fn test_name_accepts_unicode_and_diacritics() {
        for name in ["Ана", "Șerban", "O'Neil", "Anne-Marie", "José"] {
            assert!(
                validate_personal("0123 456 789", name, "Pop", Some(Gender::Female)).is_ok(),
                "{name} should be a valid name"
            );
        }
    }

    #[test]
    fn test_name_whitespace_is_collapsed() {
        let patch =
            validate_personal("0123 456 789", "  Ana   Maria ", "Pop", Some(Gender::Male))
                .unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("Ana Maria"));
    }

    #[test]
    fn test_missing_gender() {
        let errors = validate_personal("0123 456 789", "Ana", "Pop", None).unwrap_err();
        assert_eq!(errors.get(fields::GENDER), Some("Выберите пол"));
    }

    #[test]
    fn test_valid_personal_patch_carries_exactly_four_fields() {
        let patch =
            validate_personal("0123 456 789", "Ana", "Pop", Some(Gender::Male)).unwrap();
        assert_eq!(patch.phone.as_deref(), Some("0123 456 789"));
        assert_eq!(patch.first_name.as_deref(), Some("Ana"));
        assert_eq!(patch.last_name.as_deref(), Some("Pop"));
        assert_eq!(patch.gender, Some(Gender::Male));
        assert_eq!(patch.workplace, None);
        assert_eq!(patch.address, None);
        assert_eq!(patch.loan_amount, None);
        assert_eq!(patch.loan_term, None);
    }

    #[test]
    fn test_employment_requires_both_fields() {
        let errors = validate_employment("", "").unwrap_err();
        assert_eq!(errors.get(fields::WORKPLACE), Some("Выберите место работы"));
        assert_eq!(errors.get(fields::ADDRESS), Some("Обязательное поле"));
        assert_eq!(errors.len(), 2);

        assert!(validate_employment("smartphones", "Str. X 1").is_ok());
    }

    #[test]
    fn test_loan_bounds_are_inclusive() {
        assert!(validate_loan(200, 10).is_ok());
        assert!(validate_loan(1000, 30).is_ok());

        let errors = validate_loan(199, 15).unwrap_err();
        assert_eq!(errors.get(fields::LOAN_AMOUNT), Some("Минимум $200"));

        let errors = validate_loan(1001, 15).unwrap_err();
        assert_eq!(errors.get(fields::LOAN_AMOUNT), Some("Максимум $1000"));

        let errors = validate_loan(500, 9).unwrap_err();
        assert_eq!(errors.get(fields::LOAN_TERM), Some("Минимум 10 дней"));

        let errors = validate_loan(500, 31).unwrap_err();
        assert_eq!(errors.get(fields::LOAN_TERM), Some("Максимум 30 дней"));
    }
}
