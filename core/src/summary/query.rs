//! # SUMMARY QUERIES
//!
//! Read-only views over a (possibly nested) [`ValidationSummary`].
//!
//! | query | valid summary |
//! |---|---|
//! | [`ValidationSummary::error_messages`] | `[]` |
//! | [`ValidationSummary::errors_flat`] | `{}` |
//! | [`ValidationSummary::field_errors`] | `[]` |
//! | [`ValidationSummary::has_field_error`] | `false` |
//! | [`ValidationSummary::first_error`] | `None` |
//!
//! A root error hides every other error: it is the only thing reported.

use super::{KeyError, ValidationSummary};
use indexmap::IndexMap;

/// Flat `path -> message` table produced by [`ValidationSummary::errors_flat`].
pub type FlatErrors = IndexMap<String, String>;

/// Key used for the structural error in flat tables.
pub const ROOT_KEY: &str = "_root";
/// Flat message for a missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Flat message for an undeclared field.
pub const NOT_ALLOWED_MESSAGE: &str = "This field is not allowed";

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

impl ValidationSummary {
    /// **HUMAN-READABLE MESSAGES**
    ///
    /// Order: missing fields, unexpected fields, then one entry per field
    /// error. Nested failures contribute one `"<key>: <nested message>"`
    /// entry per nested message.
    pub fn error_messages(&self) -> Vec<String> {
        if self.is_valid() {
            return Vec::new();
        }
        if let Some(root) = self.root_error() {
            return vec![root.to_string()];
        }

        let errors = self.errors();
        let mut messages = Vec::new();

        if !errors.missing_properties.is_empty() {
            messages.push(format!(
                "Missing required fields: {}",
                errors.missing_properties.join(", ")
            ));
        }
        if !errors.redundant_properties.is_empty() {
            messages.push(format!(
                "Unexpected fields: {}",
                errors.redundant_properties.join(", ")
            ));
        }

        for (key, error) in errors.keys.iter() {
            match error {
                KeyError::Message(message) => messages.push(format!("{key}: {message}")),
                KeyError::Nested(nested) => messages.extend(
                    nested
                        .error_messages()
                        .into_iter()
                        .map(|message| format!("{key}: {message}")),
                ),
            }
        }

        messages
    }

    /// **FLAT ERROR TABLE**
    ///
    /// Keys are dot-joined field paths under `prefix` (pass `""` at the top).
    /// A root error maps to `_root` (or `<prefix>._root`).
    pub fn errors_flat(&self, prefix: &str) -> FlatErrors {
        let mut flat = FlatErrors::new();
        if self.is_valid() {
            return flat;
        }
        if let Some(root) = self.root_error() {
            flat.insert(join_path(prefix, ROOT_KEY), root.to_string());
            return flat;
        }

        let errors = self.errors();
        for field in &errors.missing_properties {
            flat.insert(join_path(prefix, field), REQUIRED_MESSAGE.to_string());
        }
        for field in &errors.redundant_properties {
            flat.insert(join_path(prefix, field), NOT_ALLOWED_MESSAGE.to_string());
        }
        for (key, error) in errors.keys.iter() {
            let path = join_path(prefix, key);
            match error {
                KeyError::Message(message) => {
                    flat.insert(path, message.clone());
                }
                KeyError::Nested(nested) => flat.extend(nested.errors_flat(&path)),
            }
        }

        flat
    }

    /// **FIELD ERRORS**
    ///
    /// Messages of every flat entry whose path starts with `field_path`.
    ///
    /// This is a plain string-prefix match: `"name"` also matches
    /// `"nameExtra"`.
    pub fn field_errors(&self, field_path: &str) -> Vec<String> {
        self.errors_flat("")
            .into_iter()
            .filter(|(path, _)| path.starts_with(field_path))
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether [`Self::field_errors`] is non-empty.
    pub fn has_field_error(&self, field_path: &str) -> bool {
        !self.field_errors(field_path).is_empty()
    }

    /// Whether any required field was missing at this level.
    pub fn has_missing_fields(&self) -> bool {
        !self.errors().missing_properties.is_empty()
    }

    /// First entry of [`Self::error_messages`].
    pub fn first_error(&self) -> Option<String> {
        self.error_messages().into_iter().next()
    }
}
