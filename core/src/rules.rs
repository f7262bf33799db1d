//! # BUILT-IN RULES
//!
//! **PURPOSE**: Ready-made [`Rule`] constructors for common field checks.
//!
//! Rules that only make sense for some value types (lengths, ranges,
//! patterns) return a [`RuleError`] for the others, so the form's error
//! handler reports them instead of a plain failure message.

use crate::form::{Message, Rule, RuleError};
use crate::value::{exists, JsonType};
use regex::Regex;
use serde_json::Value as JsonValue;

// ================================================================================================
// PRESENCE & TYPE
// ================================================================================================

/// **REQUIRED** - Value must exist
pub fn required() -> Rule {
    Rule::new("required", |value, _, _| exists(value), "This field is required")
}

/// **TYPE CHECK** - Value must be of `expected` type
pub fn of_type(expected: JsonType) -> Rule {
    Rule::new(
        "type",
        move |value, _, _| expected.matches(value),
        Message::computed(move |value, _, _, _| {
            format!("Expected {expected}, got {}", JsonType::of(value))
        }),
    )
}

/// **NON-EMPTY** - Strings, arrays and objects must have content
pub fn non_empty() -> Rule {
    Rule::new(
        "nonEmpty",
        |value, _, _| match value {
            JsonValue::String(s) => !s.is_empty(),
            JsonValue::Array(items) => !items.is_empty(),
            JsonValue::Object(map) => !map.is_empty(),
            _ => true,
        },
        "This field must not be empty",
    )
}

// ================================================================================================
// LENGTH - strings count characters, arrays count items
// ================================================================================================

fn length_of(value: &JsonValue) -> Result<usize, RuleError> {
    match value {
        JsonValue::String(s) => Ok(s.chars().count()),
        JsonValue::Array(items) => Ok(items.len()),
        other => Err(RuleError::new(format!(
            "length is undefined for {}",
            JsonType::of(other)
        ))),
    }
}

/// **MINIMUM LENGTH**
pub fn min_length(min: usize) -> Rule {
    Rule::fallible(
        "minLength",
        move |value, _, _| Ok(length_of(value)? >= min),
        Message::computed(move |value, _, _, _| match length_of(value) {
            Ok(len) => format!("Length {len} is below minimum {min}"),
            Err(_) => format!("Length is below minimum {min}"),
        }),
    )
}

/// **MAXIMUM LENGTH**
pub fn max_length(max: usize) -> Rule {
    Rule::fallible(
        "maxLength",
        move |value, _, _| Ok(length_of(value)? <= max),
        Message::computed(move |value, _, _, _| match length_of(value) {
            Ok(len) => format!("Length {len} exceeds maximum {max}"),
            Err(_) => format!("Length exceeds maximum {max}"),
        }),
    )
}

// ================================================================================================
// NUMERIC RANGE
// ================================================================================================

/// **NUMERIC RANGE** - Number within `min..=max`
pub fn in_range(min: f64, max: f64) -> Rule {
    Rule::fallible(
        "range",
        move |value, _, _| {
            let number = value.as_f64().ok_or_else(|| {
                RuleError::new(format!("expected number, got {}", JsonType::of(value)))
            })?;
            Ok((min..=max).contains(&number))
        },
        Message::computed(move |value, _, _, _| {
            format!("Value {value} outside valid range {min}..={max}")
        }),
    )
}

// ================================================================================================
// PATTERN & ENUMERATION
// ================================================================================================

/// **PATTERN** - String must match `regex`
pub fn pattern(regex: Regex) -> Rule {
    let source = regex.as_str().to_string();
    Rule::fallible(
        "pattern",
        move |value, _, _| {
            let text = value.as_str().ok_or_else(|| {
                RuleError::new(format!("expected string, got {}", JsonType::of(value)))
            })?;
            Ok(regex.is_match(text))
        },
        Message::computed(move |_, _, _, _| format!("Value does not match pattern {source}")),
    )
}

/// **PATTERN FROM SOURCE**
///
/// # Errors
///
/// Returns the regex compilation error for an invalid pattern.
pub fn pattern_str(source: &str) -> Result<Rule, regex::Error> {
    Regex::new(source).map(pattern)
}

/// **ONE OF** - Value must equal one of `allowed`
pub fn one_of(allowed: Vec<JsonValue>) -> Rule {
    let listed = allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Rule::new(
        "oneOf",
        move |value, _, _| allowed.contains(value),
        format!("Value must be one of: {listed}"),
    )
}

// ================================================================================================
// CUSTOM
// ================================================================================================

/// **CUSTOM** - Named predicate over the field value alone
///
/// Use [`Rule::new`] when the predicate needs the key or the whole object.
pub fn custom<F>(name: impl Into<String>, predicate: F, message: impl Into<Message>) -> Rule
where
    F: Fn(&JsonValue) -> bool + Send + Sync + 'static,
{
    Rule::new(name, move |value, _, _| predicate(value), message)
}
