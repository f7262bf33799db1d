//! # JSON VALUE HELPERS
//!
//! **PURPOSE**: Presence checks and type naming over `serde_json::Value`.
//!
//! A value "exists" when it is anything other than `null`. Missing keys and
//! explicit `null` are treated the same way everywhere in the crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Object shape validated by a form.
pub type Object = Map<String, JsonValue>;

/// **JSON TYPE ENUMERATION**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// JSON string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// JSON array
    Array,
    /// JSON object
    Object,
    /// JSON null
    Null,
}

impl JsonType {
    /// **OBSERVED TYPE** - Type tag of a concrete value
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(_) => Self::String,
            JsonValue::Number(_) => Self::Number,
            JsonValue::Bool(_) => Self::Boolean,
            JsonValue::Array(_) => Self::Array,
            JsonValue::Object(_) => Self::Object,
            JsonValue::Null => Self::Null,
        }
    }

    /// **TYPE CHECK**
    pub fn matches(self, value: &JsonValue) -> bool {
        Self::of(value) == self
    }

    /// Lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// **EXISTENCE CHECK** - `true` for every value except `null`
pub fn exists(value: &JsonValue) -> bool {
    !value.is_null()
}

/// Keys of `object` whose value exists, in object order.
pub fn present_keys(object: &Object) -> impl Iterator<Item = &str> {
    object
        .iter()
        .filter(|(_, value)| exists(value))
        .map(|(key, _)| key.as_str())
}
