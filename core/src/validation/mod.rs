//! # FORM VALIDATION
//!
//! **CORE TRAVERSAL ENGINE**
//!
//! [`validate`] checks a candidate value against a [`Form`] and returns a
//! [`ValidationSummary`]. It never fails: every problem, including errors
//! returned by fallible rules, ends up in the summary.
//!
//! ## VALIDATION PIPELINE
//!
//! 1. **ROOT CHECK** - Candidate must be an object (`null` is accepted for optional forms)
//! 2. **OPTIONS** - Unset options resolved to defaults
//! 3. **PRE-CHECK** - Missing, redundant and checkable fields classified
//! 4. **FIELD CHECKS** - Rules run per field in declaration order, nested forms recurse
//!
//! ## USAGE
//!
//! ```rust
//! use formcheck::form::{FieldSpec, Form, Rule};
//! use formcheck::validation::validate;
//! use serde_json::json;
//!
//! let form = Form::new("user").field(
//!     "age",
//!     FieldSpec::rules([Rule::new("isAdult", |v, _, _| v.as_u64().is_some_and(|n| n >= 18), "Must be at least 18")]),
//! );
//!
//! let summary = validate(&form, &json!({"age": 16}));
//! assert_eq!(summary.first_error().as_deref(), Some("age: Must be at least 18"));
//! ```

mod precheck;

pub use precheck::{pre_check, PreCheck};

use crate::form::{EffectiveOptions, FieldSpec, Form, Rule, ValidationErrorContext};
use crate::summary::ValidationSummary;
use crate::value::{exists, JsonType, Object};
use serde_json::Value as JsonValue;

/// **VALIDATE**
///
/// **PARAMETERS**:
/// - `form` - Schema to validate against, only read
/// - `candidate` - Value under validation, only read
///
/// **RETURNS**: A fresh summary owned by the caller
pub fn validate(form: &Form, candidate: &JsonValue) -> ValidationSummary {
    let mut summary = ValidationSummary::new();

    // **STEP 1**: Ensure candidate is an object
    let JsonValue::Object(object) = candidate else {
        if form.options.is_optional.unwrap_or(false) && !exists(candidate) {
            log::debug!("Form '{}': absent optional value accepted", form.name);
            return summary;
        }
        summary.set_root(format!(
            "Value must be an object, not {}",
            JsonType::of(candidate)
        ));
        log::debug!("Form '{}': rejected non-object value", form.name);
        return summary;
    };

    // **STEP 2**: Resolve options
    let options = EffectiveOptions::resolve(&form.options);

    // **STEP 3**: Classify properties
    let PreCheck {
        missing,
        redundant,
        props_to_check,
    } = pre_check(form, object);

    if !missing.is_empty() {
        summary.increment_error_count();
        summary.set_missing(missing.iter().map(ToString::to_string).collect());
    }
    if !redundant.is_empty() {
        summary.set_redundant(redundant.iter().map(ToString::to_string).collect());
        if options.no_redundant_properties {
            summary.increment_error_count();
        }
    }

    // **STEP 4**: Check present fields
    for key in props_to_check {
        if options.early_stop && !summary.is_valid() {
            log::debug!(
                "Form '{}': early stop before '{}' with {} error(s)",
                form.name,
                key,
                summary.error_count()
            );
            return summary;
        }

        // props_to_check only holds declared keys present in the object
        let (Some(spec), Some(value)) = (form.field_spec(key), object.get(key)) else {
            continue;
        };

        match spec {
            FieldSpec::Rules { rules, .. } => {
                check_rules(rules, key, value, object, &options, &mut summary);
            }
            FieldSpec::Form { form: nested, .. } => {
                log::trace!("Form '{}': descending into '{}' ({})", form.name, key, nested.name);
                summary.merge_nested(key, validate(nested, value));
            }
        }
    }

    log::debug!(
        "Form '{}': valid={} errors={}",
        form.name,
        summary.is_valid(),
        summary.error_count()
    );
    summary
}

/// Run every rule of one field. Only the first failure per field is kept.
fn check_rules(
    rules: &[Rule],
    key: &str,
    value: &JsonValue,
    object: &Object,
    options: &EffectiveOptions,
    summary: &mut ValidationSummary,
) {
    for rule in rules {
        let message = match rule.check(value, key, object) {
            Ok(true) => continue,
            Ok(false) => rule.failure_message(value, key, object),
            Err(error) => {
                log::trace!("Rule '{}' on '{}' returned error: {}", rule.name(), key, error);
                (options.validation_error_handler)(&ValidationErrorContext {
                    key,
                    value,
                    rule_name: rule.name(),
                    error: &error,
                })
            }
        };
        log::trace!("Rule '{}' failed on '{}'", rule.name(), key);
        summary.add_error(key, message);
    }
}
