use thiserror::Error;

/// Errors raised while building forms. Validation itself never fails.
#[derive(Debug, Error)]
pub enum FormError {
    /// Malformed form descriptor
    #[error("DESCRIPTOR ERROR: {code} - {message}")]
    Descriptor {
        /// One of [`error_codes`]
        code: String,
        /// Human-readable detail
        message: String,
    },

    /// Rule name not present in the built-in catalog
    #[error("UNKNOWN RULE: field '{field}' references unknown rule '{rule}'")]
    UnknownRule {
        /// Field declaring the rule
        field: String,
        /// Unrecognised rule name
        rule: String,
    },

    /// `pattern` rule with an invalid regular expression
    #[error("INVALID PATTERN: field '{field}' - {source}")]
    InvalidPattern {
        /// Field declaring the rule
        field: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Descriptor text is not valid JSON for the descriptor shape
    #[error("JSON ERROR: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn descriptor(code: &str, message: impl Into<String>) -> Self {
        Self::Descriptor {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// **FORM ERROR CODES**
///
/// Stable codes carried by [`FormError::Descriptor`].
pub mod error_codes {
    /// Field declares both `rules` and `form`
    pub const AMBIGUOUS_FIELD: &str = "FORMCHECK_DESCRIPTOR_AMBIGUOUS_FIELD";
    /// Field declares neither `rules` nor `form`
    pub const EMPTY_FIELD: &str = "FORMCHECK_DESCRIPTOR_EMPTY_FIELD";
    /// Field name declared twice in one form
    pub const DUPLICATE_FIELD: &str = "FORMCHECK_DESCRIPTOR_DUPLICATE_FIELD";
    /// Catalog rule without a required parameter
    pub const MISSING_PARAMETER: &str = "FORMCHECK_DESCRIPTOR_MISSING_PARAMETER";
    /// Catalog rule parameter of the wrong shape
    pub const INVALID_PARAMETER: &str = "FORMCHECK_DESCRIPTOR_INVALID_PARAMETER";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_display() {
        let err = FormError::descriptor(error_codes::EMPTY_FIELD, "field 'a' has neither rules nor form");
        assert_eq!(
            err.to_string(),
            "DESCRIPTOR ERROR: FORMCHECK_DESCRIPTOR_EMPTY_FIELD - field 'a' has neither rules nor form"
        );
    }

    #[test]
    fn test_error_codes_exist() {
        assert!(!error_codes::AMBIGUOUS_FIELD.is_empty());
        assert!(!error_codes::EMPTY_FIELD.is_empty());
        assert!(!error_codes::DUPLICATE_FIELD.is_empty());
        assert!(!error_codes::MISSING_PARAMETER.is_empty());
        assert!(!error_codes::INVALID_PARAMETER.is_empty());
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormError = parse.into();
        assert!(matches!(err, FormError::Json(_)));
    }
}
