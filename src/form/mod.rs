//! Shared form state and validation schema
//!
//! The wizard accumulates validated field values into a single [`FormData`]
//! record via shallow merges of [`FormPatch`] values. The `schema` submodule
//! holds the declarative per-step validation rules.

pub mod data;
pub mod schema;

pub use data::{FormData, FormPatch, Gender};
pub use schema::{FieldErrors, StepSchema};
