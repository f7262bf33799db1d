//! # VALIDATION SUMMARY
//!
//! **PURPOSE**: Aggregated result of one validation pass.
//!
//! A summary is created fresh for every [`crate::validation::validate`] call
//! (nested calls included), mutated only while that call runs, and handed to
//! the caller read-only. Nested form failures are embedded as
//! [`KeyError::Nested`], so a summary is a tree mirroring the form.
//!
//! **INVARIANT**: `is_valid() == (error_count() == 0)`.

pub mod query;

pub use query::FlatErrors;

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Per-field error table, in the order errors were recorded.
pub type KeyErrors = IndexMap<String, KeyError>;

/// **FIELD ERROR**
///
/// Serialises as a bare string or as a nested summary object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KeyError {
    /// Leaf rule failure
    Message(String),
    /// Composite field failure
    Nested(ValidationSummary),
}

/// **ERROR DETAILS**
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryErrors {
    /// First error recorded for each failing field
    pub keys: KeyErrors,
    /// Required fields with no value
    pub missing_properties: Vec<String>,
    /// Present fields the form does not declare
    pub redundant_properties: Vec<String>,
    /// Structural failure: the candidate was not an object
    pub root: Option<String>,
}

/// **VALIDATION SUMMARY**
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    valid: bool,
    error_count: usize,
    errors: SummaryErrors,
}

impl ValidationSummary {
    /// **CONSTRUCTOR** - Valid, zero errors
    pub fn new() -> Self {
        Self {
            valid: true,
            error_count: 0,
            errors: SummaryErrors::default(),
        }
    }

    /// Whether validation passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of recorded errors, nested ones included.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Error details.
    pub fn errors(&self) -> &SummaryErrors {
        &self.errors
    }

    /// Error recorded for `key`, if any.
    pub fn key_error(&self, key: &str) -> Option<&KeyError> {
        self.errors.keys.get(key)
    }

    /// Structural failure message, if any.
    pub fn root_error(&self) -> Option<&str> {
        self.errors.root.as_deref()
    }

    pub(crate) fn increment_error_count(&mut self) {
        self.error_count += 1;
        self.valid = false;
    }

    /// Record `message` for `key` unless `key` already has an error.
    pub(crate) fn add_error(&mut self, key: &str, message: String) {
        if self.errors.keys.contains_key(key) {
            return;
        }
        self.errors.keys.insert(key.to_string(), KeyError::Message(message));
        self.increment_error_count();
    }

    /// Fold an invalid nested summary into this one; valid ones are ignored.
    pub(crate) fn merge_nested(&mut self, key: &str, nested: ValidationSummary) {
        if nested.valid {
            return;
        }
        self.valid = false;
        self.error_count += nested.error_count;
        if let Some(KeyError::Nested(replaced)) =
            self.errors.keys.insert(key.to_string(), KeyError::Nested(nested))
        {
            self.error_count -= replaced.error_count;
        }
    }

    pub(crate) fn set_root(&mut self, message: String) {
        self.errors.root = Some(message);
        self.increment_error_count();
    }

    pub(crate) fn set_missing(&mut self, fields: Vec<String>) {
        self.errors.missing_properties = fields;
    }

    pub(crate) fn set_redundant(&mut self, fields: Vec<String>) {
        self.errors.redundant_properties = fields;
    }
}

impl Default for ValidationSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages from [`ValidationSummary::error_messages`] joined by `"; "`.
impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        f.write_str(&self.error_messages().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_nested() -> ValidationSummary {
        let mut nested = ValidationSummary::new();
        nested.add_error("city", "City is required".to_string());
        nested.add_error("zip", "Zip is required".to_string());
        nested
    }

    #[test]
    fn test_new_summary_is_valid() {
        let summary = ValidationSummary::new();
        assert!(summary.is_valid());
        assert_eq!(summary.error_count(), 0);
        assert!(summary.errors().keys.is_empty());
        assert!(summary.root_error().is_none());
    }

    #[test]
    fn test_add_error_first_wins() {
        let mut summary = ValidationSummary::new();
        summary.add_error("age", "first".to_string());
        summary.add_error("age", "second".to_string());
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.key_error("age"), Some(&KeyError::Message("first".to_string())));
        assert!(!summary.is_valid());
    }

    #[test]
    fn test_merge_valid_nested_is_noop() {
        let mut summary = ValidationSummary::new();
        summary.merge_nested("address", ValidationSummary::new());
        assert!(summary.is_valid());
        assert!(summary.key_error("address").is_none());
    }

    #[test]
    fn test_merge_invalid_nested_adds_count() {
        let mut summary = ValidationSummary::new();
        summary.add_error("name", "bad".to_string());
        summary.merge_nested("address", invalid_nested());
        assert_eq!(summary.error_count(), 3);
        assert!(matches!(summary.key_error("address"), Some(KeyError::Nested(n)) if n.error_count() == 2));
    }

    #[test]
    fn test_merge_same_key_twice_keeps_count_consistent() {
        let mut summary = ValidationSummary::new();
        summary.merge_nested("address", invalid_nested());
        summary.merge_nested("address", invalid_nested());
        assert_eq!(summary.error_count(), 2);
        assert_eq!(summary.errors().keys.len(), 1);
    }

    #[test]
    fn test_set_root() {
        let mut summary = ValidationSummary::new();
        summary.set_root("Value must be an object, not string".to_string());
        assert!(!summary.is_valid());
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.root_error(), Some("Value must be an object, not string"));
    }

    #[test]
    fn test_serialized_shape() {
        let mut summary = ValidationSummary::new();
        summary.set_missing(vec!["name".to_string()]);
        summary.increment_error_count();
        summary.merge_nested("address", invalid_nested());

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "valid": false,
                "errorCount": 3,
                "errors": {
                    "keys": {
                        "address": {
                            "valid": false,
                            "errorCount": 2,
                            "errors": {
                                "keys": {"city": "City is required", "zip": "Zip is required"},
                                "missingProperties": [],
                                "redundantProperties": [],
                                "root": null
                            }
                        }
                    },
                    "missingProperties": ["name"],
                    "redundantProperties": [],
                    "root": null
                }
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidationSummary::new().to_string(), "valid");
        let mut summary = ValidationSummary::new();
        summary.add_error("a", "bad a".to_string());
        summary.add_error("b", "bad b".to_string());
        assert_eq!(summary.to_string(), "a: bad a; b: bad b");
    }
}
