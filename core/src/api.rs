pub use crate::descriptor::{FieldDescriptor, FormDescriptor, RuleDescriptor};
pub use crate::errors::FormError;
pub use crate::form::{
    EffectiveOptions, ErrorHandler, FieldSpec, Form, FormOptions, Message, Rule, RuleError,
    RuleMeta, ValidationErrorContext,
};
pub use crate::summary::{FlatErrors, KeyError, SummaryErrors, ValidationSummary};
pub use crate::validation::{pre_check, validate, PreCheck};
pub use crate::value::{JsonType, Object};
