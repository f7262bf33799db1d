//! # FORMCHECK
//!
//! **DECLARATIVE OBJECT VALIDATION**
//!
//! **ARCHITECTURE**: A [`form::Form`] declares fields as rule lists or nested forms;
//! [`validation::validate`] walks a `serde_json::Value` against it and returns a
//! [`summary::ValidationSummary`] tree that the query methods flatten on demand.
//! **GUARANTEE**: Validation never panics on user data and never returns an error;
//! every failure is data in the summary.

pub mod api;
pub mod descriptor;
pub mod errors;
pub mod form;
pub mod rules;
pub mod summary;
pub mod validation;
pub mod value;

pub use api::*;
