//! # FORM DEFINITIONS
//!
//! **PURPOSE**: Declarative description of an expected object shape.
//!
//! A [`Form`] maps field names to a [`FieldSpec`] (an ordered rule list or a
//! nested form) and carries [`FormOptions`] controlling traversal. Forms are
//! pure configuration: validation only reads them.
//!
//! ## USAGE
//!
//! ```rust
//! use formcheck::form::{FieldSpec, Form, FormOptions, Rule};
//! use serde_json::json;
//!
//! let form = Form::new("user")
//!     .field(
//!         "name",
//!         FieldSpec::rules([Rule::new(
//!             "nonEmpty",
//!             |v, _, _| v.as_str().is_some_and(|s| !s.is_empty()),
//!             "Name is required",
//!         )]),
//!     )
//!     .options(FormOptions::new().early_stop(true));
//!
//! assert!(form.validate(&json!({"name": "Ada"})).is_valid());
//! ```

pub mod rule;

pub use rule::{Message, Rule, RuleError, RuleMeta};

use crate::summary::ValidationSummary;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

// ================================================================================================
// FIELD SPECIFICATION
// ================================================================================================

/// **FIELD SPECIFICATION**
///
/// Exactly one of: a leaf rule list, or a nested form.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    /// Leaf field checked against rules in declared order
    Rules {
        /// Rules, run in order
        rules: Vec<Rule>,
        /// Field may be absent
        is_optional: bool,
    },
    /// Composite field validated recursively against another form
    Form {
        /// Nested form
        form: Arc<Form>,
        /// Field may be absent
        is_optional: bool,
    },
}

impl FieldSpec {
    /// **REQUIRED LEAF FIELD**
    pub fn rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::Rules {
            rules: rules.into_iter().collect(),
            is_optional: false,
        }
    }

    /// **REQUIRED COMPOSITE FIELD**
    pub fn form(form: impl Into<Arc<Form>>) -> Self {
        Self::Form {
            form: form.into(),
            is_optional: false,
        }
    }

    /// Mark the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        match &mut self {
            Self::Rules { is_optional, .. } | Self::Form { is_optional, .. } => *is_optional = true,
        }
        self
    }

    /// Whether the field may be absent.
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Rules { is_optional, .. } | Self::Form { is_optional, .. } => *is_optional,
        }
    }
}

// ================================================================================================
// OPTIONS
// ================================================================================================

/// Input of a [`ErrorHandler`]: which rule failed with which error.
#[derive(Debug, Clone, Copy)]
pub struct ValidationErrorContext<'a> {
    /// Field name
    pub key: &'a str,
    /// Field value
    pub value: &'a JsonValue,
    /// Name of the rule whose predicate failed
    pub rule_name: &'a str,
    /// Error returned by the predicate
    pub error: &'a RuleError,
}

/// Builds the field message for a rule whose predicate returned an error.
pub type ErrorHandler = Arc<dyn Fn(&ValidationErrorContext<'_>) -> String + Send + Sync>;

/// Default [`ErrorHandler`] text.
pub fn default_error_handler(ctx: &ValidationErrorContext<'_>) -> String {
    format!(
        "Error while validating property \"{}\" with rule \"{}\": {}",
        ctx.key, ctx.rule_name, ctx.error
    )
}

/// **FORM OPTIONS**
///
/// Unset options fall back to the defaults documented on
/// [`EffectiveOptions`].
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOptions {
    /// Fail validation on undeclared fields (default `true`)
    pub no_redundant_properties: Option<bool>,
    /// Stop before the next field once the summary is invalid (default `false`)
    pub early_stop: Option<bool>,
    /// Accept an absent (`null`) candidate (default `false`)
    pub is_optional: Option<bool>,
    /// Message builder for predicate errors
    #[serde(skip)]
    pub validation_error_handler: Option<ErrorHandler>,
}

impl FormOptions {
    /// **CONSTRUCTOR** - All options unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `no_redundant_properties`.
    #[must_use]
    pub fn no_redundant_properties(mut self, enabled: bool) -> Self {
        self.no_redundant_properties = Some(enabled);
        self
    }

    /// Set `early_stop`.
    #[must_use]
    pub fn early_stop(mut self, enabled: bool) -> Self {
        self.early_stop = Some(enabled);
        self
    }

    /// Set `is_optional`.
    #[must_use]
    pub fn optional(mut self, enabled: bool) -> Self {
        self.is_optional = Some(enabled);
        self
    }

    /// Set the predicate error handler.
    #[must_use]
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ValidationErrorContext<'_>) -> String + Send + Sync + 'static,
    {
        self.validation_error_handler = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("no_redundant_properties", &self.no_redundant_properties)
            .field("early_stop", &self.early_stop)
            .field("is_optional", &self.is_optional)
            .field(
                "validation_error_handler",
                &self.validation_error_handler.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// **RESOLVED OPTIONS**
///
/// | option | default |
/// |---|---|
/// | `no_redundant_properties` | `true` |
/// | `early_stop` | `false` |
/// | `is_optional` | `false` |
/// | `validation_error_handler` | [`default_error_handler`] |
#[derive(Clone)]
pub struct EffectiveOptions {
    /// See [`FormOptions::no_redundant_properties`]
    pub no_redundant_properties: bool,
    /// See [`FormOptions::early_stop`]
    pub early_stop: bool,
    /// See [`FormOptions::is_optional`]
    pub is_optional: bool,
    /// See [`FormOptions::validation_error_handler`]
    pub validation_error_handler: ErrorHandler,
}

impl EffectiveOptions {
    /// Fill every unset option with its default.
    pub fn resolve(options: &FormOptions) -> Self {
        let defaults = Self::default();
        Self {
            no_redundant_properties: options
                .no_redundant_properties
                .unwrap_or(defaults.no_redundant_properties),
            early_stop: options.early_stop.unwrap_or(defaults.early_stop),
            is_optional: options.is_optional.unwrap_or(defaults.is_optional),
            validation_error_handler: options
                .validation_error_handler
                .clone()
                .unwrap_or(defaults.validation_error_handler),
        }
    }
}

impl Default for EffectiveOptions {
    fn default() -> Self {
        Self {
            no_redundant_properties: true,
            early_stop: false,
            is_optional: false,
            validation_error_handler: Arc::new(default_error_handler),
        }
    }
}

impl fmt::Debug for EffectiveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveOptions")
            .field("no_redundant_properties", &self.no_redundant_properties)
            .field("early_stop", &self.early_stop)
            .field("is_optional", &self.is_optional)
            .finish_non_exhaustive()
    }
}

// ================================================================================================
// FORM
// ================================================================================================

/// **FORM**
///
/// **GUARANTEE**: Field declaration order is preserved and drives the order
/// in which fields are checked and errors are reported. A field name is
/// declared at most once.
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// Form name, used in logs
    pub name: String,
    /// Declared fields in declaration order
    pub definition: IndexMap<String, FieldSpec>,
    /// Traversal options
    pub options: FormOptions,
}

impl Form {
    /// **CONSTRUCTOR** - Empty form
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: IndexMap::new(),
            options: FormOptions::default(),
        }
    }

    /// **ADD FIELD**
    ///
    /// Redeclaring a field replaces its spec in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.definition.insert(name.into(), spec);
        self
    }

    /// **SET OPTIONS**
    #[must_use]
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Spec of a declared field.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.definition.get(name)
    }

    /// Whether `name` is declared.
    pub fn declares(&self, name: &str) -> bool {
        self.field_spec(name).is_some()
    }

    /// Declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.definition.keys().map(String::as_str)
    }

    /// **VALIDATE** - See [`crate::validation::validate`]
    pub fn validate(&self, candidate: &JsonValue) -> ValidationSummary {
        crate::validation::validate(self, candidate)
    }
}
