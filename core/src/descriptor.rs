//! # FORM DESCRIPTORS
//!
//! **PURPOSE**: Describe a [`Form`] as data (JSON) and compile it against the
//! built-in rule catalog in [`crate::rules`].
//!
//! ```json
//! {
//!   "name": "customer",
//!   "options": { "earlyStop": true },
//!   "fields": [
//!     { "name": "email", "rules": [{ "rule": "pattern", "pattern": "^[^@]+@[^@]+$" }] },
//!     { "name": "age", "optional": true, "rules": [{ "rule": "range", "min": 18, "max": 130 }] },
//!     { "name": "address", "form": { "name": "address", "fields": [ ... ] } }
//!   ]
//! }
//! ```
//!
//! ## RULE CATALOG
//!
//! | rule | parameters |
//! |---|---|
//! | `required` | - |
//! | `type` | `type`: `string`, `number`, `boolean`, `array`, `object`, `null` |
//! | `nonEmpty` | - |
//! | `minLength` | `min` |
//! | `maxLength` | `max` |
//! | `range` | `min`, `max` |
//! | `pattern` | `pattern` |
//! | `oneOf` | `values` |
//!
//! Every rule accepts an optional `message` overriding its default text.

use crate::errors::{error_codes, FormError};
use crate::form::{FieldSpec, Form, FormOptions, Rule};
use crate::rules;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

/// **FORM DESCRIPTOR**
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDescriptor {
    /// Form name
    pub name: String,
    /// Traversal options
    #[serde(default)]
    pub options: FormOptions,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// **FIELD DESCRIPTOR**
///
/// Exactly one of `rules` and `form` must be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Leaf rules
    #[serde(default)]
    pub rules: Option<Vec<RuleDescriptor>>,
    /// Nested form
    #[serde(default)]
    pub form: Option<FormDescriptor>,
}

/// **RULE DESCRIPTOR**
///
/// `rule` names a catalog entry; the remaining keys are its parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleDescriptor {
    /// Catalog rule name
    pub rule: String,
    /// Replacement failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rule parameters
    #[serde(flatten)]
    pub params: Map<String, JsonValue>,
}

impl FormDescriptor {
    /// **PARSE** - Descriptor from JSON text
    ///
    /// # Errors
    ///
    /// [`FormError::Json`] when the text does not describe a form.
    pub fn from_json_str(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }

    /// **COMPILE** - Resolve every rule against the catalog
    ///
    /// # Errors
    ///
    /// - [`FormError::Descriptor`] for duplicate, empty or ambiguous fields and bad parameters
    /// - [`FormError::UnknownRule`] for names missing from the catalog
    /// - [`FormError::InvalidPattern`] for `pattern` rules that do not compile
    pub fn compile(&self) -> Result<Form, FormError> {
        let mut form = Form::new(self.name.clone()).options(self.options.clone());

        for field in &self.fields {
            if form.declares(&field.name) {
                return Err(FormError::descriptor(
                    error_codes::DUPLICATE_FIELD,
                    format!("form '{}' declares field '{}' twice", self.name, field.name),
                ));
            }
            let spec = field.compile()?;
            form.definition.insert(field.name.clone(), spec);
        }

        log::debug!(
            "Compiled form '{}' with {} field(s)",
            form.name,
            form.definition.len()
        );
        Ok(form)
    }
}

impl FieldDescriptor {
    fn compile(&self) -> Result<FieldSpec, FormError> {
        let spec = match (&self.rules, &self.form) {
            (Some(rules), None) => FieldSpec::rules(
                rules
                    .iter()
                    .map(|rule| rule.compile(&self.name))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            (None, Some(nested)) => FieldSpec::form(Arc::new(nested.compile()?)),
            (Some(_), Some(_)) => {
                return Err(FormError::descriptor(
                    error_codes::AMBIGUOUS_FIELD,
                    format!("field '{}' declares both rules and form", self.name),
                ))
            }
            (None, None) => {
                return Err(FormError::descriptor(
                    error_codes::EMPTY_FIELD,
                    format!("field '{}' has neither rules nor form", self.name),
                ))
            }
        };
        Ok(if self.optional { spec.optional() } else { spec })
    }
}

impl RuleDescriptor {
    /// **RESOLVE** - Catalog rule for `field`
    ///
    /// # Errors
    ///
    /// See [`FormDescriptor::compile`].
    pub fn compile(&self, field: &str) -> Result<Rule, FormError> {
        let rule = match self.rule.as_str() {
            "required" => rules::required(),
            "type" => rules::of_type(self.param(field, "type")?),
            "nonEmpty" => rules::non_empty(),
            "minLength" => rules::min_length(self.param(field, "min")?),
            "maxLength" => rules::max_length(self.param(field, "max")?),
            "range" => rules::in_range(self.param(field, "min")?, self.param(field, "max")?),
            "pattern" => {
                let source: String = self.param(field, "pattern")?;
                let regex = Regex::new(&source).map_err(|source| FormError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?;
                rules::pattern(regex)
            }
            "oneOf" => rules::one_of(self.param(field, "values")?),
            other => {
                return Err(FormError::UnknownRule {
                    field: field.to_string(),
                    rule: other.to_string(),
                })
            }
        };

        Ok(match &self.message {
            Some(message) => rule.with_message(message.as_str()),
            None => rule,
        })
    }

    fn param<T: serde::de::DeserializeOwned>(&self, field: &str, name: &str) -> Result<T, FormError> {
        let raw = self.params.get(name).ok_or_else(|| {
            FormError::descriptor(
                error_codes::MISSING_PARAMETER,
                format!("rule '{}' on field '{field}' requires '{name}'", self.rule),
            )
        })?;
        serde_json::from_value(raw.clone()).map_err(|err| {
            FormError::descriptor(
                error_codes::INVALID_PARAMETER,
                format!("rule '{}' on field '{field}': invalid '{name}': {err}", self.rule),
            )
        })
    }
}

impl Form {
    /// **FORM FROM JSON** - Parse and compile a [`FormDescriptor`]
    ///
    /// # Errors
    ///
    /// See [`FormDescriptor::from_json_str`] and [`FormDescriptor::compile`].
    pub fn from_json_str(text: &str) -> Result<Self, FormError> {
        FormDescriptor::from_json_str(text)?.compile()
    }
}
