//! loanwiz - Terminal-based three-step loan application wizard
//!
//! A ratatui application that collects personal, address/employment and
//! loan-parameter data across three guarded steps, validates each step
//! against a declarative schema, and submits a summary to a remote service.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Runtime settings (API endpoint, cache TTL)
//! - `error`: Custom error types
//! - `form`: Shared form state and the per-step validation schema
//! - `wizard`: Step state machine with guarded navigation
//! - `catalog`: Category provider (HTTP fetch, normalization, TTL cache)
//!   and the submission client
//! - `tui`: The ratatui front end

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod tui;
pub mod wizard;

pub use error::{WizardError, WizardResult};
