//! Property classification run before any rule.

use crate::form::Form;
use crate::value::{present_keys, Object};

/// **PRE-CHECK RESULT**
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreCheck<'a> {
    /// Required fields with no value, in declaration order
    pub missing: Vec<&'a str>,
    /// Present fields the form does not declare, in object order
    pub redundant: Vec<&'a str>,
    /// Declared fields that have a value, in declaration order
    pub props_to_check: Vec<&'a str>,
}

/// **CLASSIFY PROPERTIES**
///
/// A field counts as present only when its value exists: an explicit `null`
/// is missing, not present-with-null.
pub fn pre_check<'a>(form: &'a Form, object: &'a Object) -> PreCheck<'a> {
    let present: Vec<&str> = present_keys(object).collect();

    let missing = form
        .definition
        .iter()
        .filter(|(_, spec)| !spec.is_optional())
        .map(|(name, _)| name.as_str())
        .filter(|name| !present.contains(name))
        .collect();

    let redundant = present
        .iter()
        .copied()
        .filter(|key| !form.declares(key))
        .collect();

    let props_to_check = form
        .field_names()
        .filter(|name| present.contains(name))
        .collect();

    PreCheck {
        missing,
        redundant,
        props_to_check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldSpec, Rule};
    use serde_json::json;

    fn test_form() -> Form {
        Form::new("testForm")
            .field(
                "required",
                FieldSpec::rules([Rule::new("exists", |_, _, _| true, "This field is required")]),
            )
            .field(
                "optional",
                FieldSpec::rules([Rule::new("isString", |v, _, _| v.is_string(), "Must be a string")])
                    .optional(),
            )
    }

    #[test]
    fn test_empty_object() {
        let form = test_form();
        let value = json!({});
        let result = pre_check(&form, value.as_object().unwrap());
        assert_eq!(result.missing, vec!["required"]);
        assert!(result.redundant.is_empty());
        assert!(result.props_to_check.is_empty());
    }

    #[test]
    fn test_all_properties() {
        let form = test_form();
        let value = json!({"extra": "value", "optional": "value", "required": "value"});
        let result = pre_check(&form, value.as_object().unwrap());
        assert!(result.missing.is_empty());
        assert_eq!(result.redundant, vec!["extra"]);
        assert_eq!(result.props_to_check, vec!["required", "optional"]);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let form = test_form();
        let value = json!({"required": null, "optional": null});
        let result = pre_check(&form, value.as_object().unwrap());
        assert_eq!(result.missing, vec!["required"]);
        assert!(result.props_to_check.is_empty());
        assert!(result.redundant.is_empty());
    }

    #[test]
    fn test_null_undeclared_is_not_redundant() {
        let form = test_form();
        let value = json!({"required": 1, "ghost": null});
        let result = pre_check(&form, value.as_object().unwrap());
        assert!(result.redundant.is_empty());
    }
}
