//! # FIELD RULES
//!
//! A [`Rule`] is one named check for one field: a predicate plus the message
//! reported when the predicate does not hold.

use crate::value::Object;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a fallible rule predicate.
///
/// Never escapes validation: it is turned into a field message by the
/// form's error handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    /// **CONSTRUCTOR**
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RuleError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RuleError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Rule data exposed to computed messages (the rule minus its closures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
    /// Rule name
    pub name: String,
}

type Predicate = dyn Fn(&JsonValue, &str, &Object) -> Result<bool, RuleError> + Send + Sync;
type MessageFn = dyn Fn(&JsonValue, &str, &Object, &RuleMeta) -> String + Send + Sync;

/// **FAILURE MESSAGE**
///
/// Either fixed text or text computed from the failing value.
#[derive(Clone)]
pub enum Message {
    /// Fixed text
    Static(String),
    /// Called with `(value, key, object, rule_meta)` at failure time
    Computed(Arc<MessageFn>),
}

impl Message {
    /// **COMPUTED MESSAGE CONSTRUCTOR**
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&JsonValue, &str, &Object, &RuleMeta) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Produce the message text for a failure.
    pub fn render(&self, value: &JsonValue, key: &str, object: &Object, meta: &RuleMeta) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Computed(f) => f(value, key, object, meta),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Static(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Static(text)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// **VALIDATION RULE**
///
/// **GUARANTEE**: Immutable once built. Cloning shares the underlying closures.
#[derive(Clone)]
pub struct Rule {
    name: String,
    validator: Arc<Predicate>,
    message: Message,
}

impl Rule {
    /// **CONSTRUCTOR** - Infallible predicate
    ///
    /// **PARAMETERS**:
    /// - `name` - Rule identifier, passed to computed messages and error handlers
    /// - `validator` - Called with `(value, key, whole_object)`; `false` fails the field
    /// - `message` - Static text or [`Message::Computed`]
    pub fn new<F>(name: impl Into<String>, validator: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&JsonValue, &str, &Object) -> bool + Send + Sync + 'static,
    {
        Self::fallible(name, move |value, key, object| Ok(validator(value, key, object)), message)
    }

    /// **CONSTRUCTOR** - Predicate that may fail with a [`RuleError`]
    pub fn fallible<F>(name: impl Into<String>, validator: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&JsonValue, &str, &Object) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: message.into(),
        }
    }

    /// Replace the failure message, keeping the predicate.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = message.into();
        self
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Failure message definition.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Rule stripped of predicate and message.
    pub fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: self.name.clone(),
        }
    }

    /// **RUN PREDICATE**
    ///
    /// # Errors
    ///
    /// Returns the predicate's own [`RuleError`] unchanged.
    pub fn check(&self, value: &JsonValue, key: &str, object: &Object) -> Result<bool, RuleError> {
        (self.validator)(value, key, object)
    }

    /// Message for a failed check of `value` under `key`.
    pub fn failure_message(&self, value: &JsonValue, key: &str, object: &Object) -> String {
        self.message.render(value, key, object, &self.meta())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
