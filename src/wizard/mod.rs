//! Wizard navigation state machine
//!
//! Three steps with guarded entry: a later step is reachable only while every
//! earlier step's completeness predicate holds over the shared form state.
//! Requesting a step that is not yet reachable resolves to the earliest
//! incomplete step instead.

use std::fmt;

use crate::form::schema::{
    LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN, LOAN_TERM_MAX, LOAN_TERM_MIN,
};
use crate::form::{schema, FormData};

/// One wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Step 1: personal data
    #[default]
    Personal,
    /// Step 2: address and employment
    Employment,
    /// Step 3: loan parameters
    Loan,
}

impl Step {
    /// All steps, in wizard order
    pub const ALL: [Step; 3] = [Step::Personal, Step::Employment, Step::Loan];

    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Employment => 2,
            Step::Loan => 3,
        }
    }

    /// Localized step title for the progress header
    pub fn title(&self) -> &'static str {
        match self {
            Step::Personal => "Личные данные",
            Step::Employment => "Адрес и место работы",
            Step::Loan => "Параметры займа",
        }
    }

    /// The step after this one, if any
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Employment),
            Step::Employment => Some(Step::Loan),
            Step::Loan => None,
        }
    }

    /// The step before this one, if any
    pub fn back(&self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Employment => Some(Step::Personal),
            Step::Loan => Some(Step::Employment),
        }
    }

    /// Parse a step request ("1", "step1", "/step1")
    ///
    /// Unknown requests fall back to step 1, mirroring the catch-all route of
    /// the wizard (unknown paths land on the first step).
    pub fn parse(raw: &str) -> Step {
        match raw.trim().trim_start_matches('/') {
            "1" | "step1" => Step::Personal,
            "2" | "step2" => Step::Employment,
            "3" | "step3" => Step::Loan,
            _ => Step::Personal,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Шаг {}/3: {}", self.number(), self.title())
    }
}

/// Does the shared state satisfy step 1?
///
/// Recomputed on every navigation check; nothing about completeness is
/// stored. Phone is re-checked against the pattern, not just for presence.
pub fn step1_complete(data: &FormData) -> bool {
    let phone_ok = data
        .phone
        .as_deref()
        .is_some_and(|p| {
            schema::StepSchema::personal()
                .check_text(schema::fields::PHONE, p)
                .is_none()
        });

    phone_ok
        && data.first_name.as_deref().is_some_and(|s| !s.is_empty())
        && data.last_name.as_deref().is_some_and(|s| !s.is_empty())
        && data.gender.is_some()
}

/// Does the shared state satisfy step 2?
pub fn step2_complete(data: &FormData) -> bool {
    data.workplace.as_deref().is_some_and(|s| !s.is_empty())
        && data.address.as_deref().is_some_and(|s| !s.is_empty())
}

/// Does the shared state satisfy step 3?
pub fn step3_complete(data: &FormData) -> bool {
    data.loan_amount
        .is_some_and(|v| (LOAN_AMOUNT_MIN..=LOAN_AMOUNT_MAX).contains(&v))
        && data
            .loan_term
            .is_some_and(|v| (LOAN_TERM_MIN..=LOAN_TERM_MAX).contains(&v))
}

/// Resolve a requested step against the guards
///
/// Returns the requested step when reachable, otherwise the earliest
/// incomplete step.
pub fn resolve_entry(requested: Step, data: &FormData) -> Step {
    match requested {
        Step::Personal => Step::Personal,
        Step::Employment => {
            if step1_complete(data) {
                Step::Employment
            } else {
                Step::Personal
            }
        }
        Step::Loan => {
            if !step1_complete(data) {
                Step::Personal
            } else if !step2_complete(data) {
                Step::Employment
            } else {
                Step::Loan
            }
        }
    }
}
