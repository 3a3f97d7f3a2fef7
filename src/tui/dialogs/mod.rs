//! Modal dialogs
//!
//! The success confirmation shown after a submission and the blocking error
//! dialog for remote failures.

pub mod confirm;
pub mod error;

pub use error::ErrorInfo;
