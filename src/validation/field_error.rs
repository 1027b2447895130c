//! Single-field failure records.

use crate::core::{FieldType, Map, Value};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Error type returned by custom validators.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Shared source error attached to a `FieldError`.
pub type SharedError = Arc<dyn StdError + Send + Sync>;

/// Field name used for failures that belong to the model as a whole.
pub const BASE_FIELD: &str = "__base__";

/// What went wrong with a field.
///
/// Failures of a nested model keep the inner kind; the nesting shows up in
/// the dotted field path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Null input on a non-nullable field
    NullNotAllowed,

    /// Raw value could not be converted to the expected type
    CoercionFailure,

    /// Coerced value still is not an instance of the expected type
    TypeMismatch,

    /// Custom validator rejected the value
    ValidatorFailure,

    /// Field absent from input with no default and not nullable
    MissingRequiredField,

    /// Input keys not declared on the model
    UnexpectedField,

    /// One list element failed coercion or nested construction
    ListItemFailure,
}

/// A single field-level validation failure.
///
/// Immutable once built; prefixing for nested paths produces a new record.
#[derive(Debug, Clone, Error)]
#[error("{field}:{message}")]
pub struct FieldError {
    field: String,
    value: Value,
    expected: Option<FieldType>,
    message: String,
    kind: ErrorKind,
    #[source]
    cause: Option<SharedError>,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        value: Value,
        expected: Option<FieldType>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value,
            expected,
            message: message.into(),
            kind,
            cause: None,
        }
    }

    /// Attach the error that caused this failure.
    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(cause))
    }

    pub fn with_shared_cause(mut self, cause: SharedError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub(crate) fn null_not_allowed(field: &str, expected: &FieldType) -> Self {
        Self::new(
            field,
            Value::Null,
            Some(expected.clone()),
            ErrorKind::NullNotAllowed,
            "None not allowed",
        )
    }

    pub(crate) fn missing(field: &str, expected: &FieldType) -> Self {
        Self::new(
            field,
            Value::Null,
            Some(expected.clone()),
            ErrorKind::MissingRequiredField,
            "Missing required field.",
        )
    }

    pub(crate) fn unexpected(remaining: Map) -> Self {
        let keys: Vec<&str> = remaining.keys().map(String::as_str).collect();
        let message = format!("Unexpected fields: {}", keys.join(", "));
        Self::new(
            BASE_FIELD,
            Value::Map(remaining),
            None,
            ErrorKind::UnexpectedField,
            message,
        )
    }

    /// Re-root this error under `outer`, giving `outer.field`.
    pub fn under(self, outer: &str) -> Self {
        Self {
            field: format!("{outer}.{}", self.field),
            ..self
        }
    }

    /// Dotted/bracketed path of the failing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The offending value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Expected type, absent for model-level failures.
    pub fn expected(&self) -> Option<&FieldType> {
        self.expected.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn cause(&self) -> Option<&SharedError> {
        self.cause.as_ref()
    }

    /// Structured form: `{field, value, expected, message, cause, kind}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "value": self.value.to_json(),
            "expected": self.expected.as_ref().map(ToString::to_string),
            "message": self.message,
            "cause": self.cause.as_ref().map(ToString::to_string),
            "kind": self.kind,
        })
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 6)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("expected", &self.expected)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("cause", &self.cause.as_ref().map(ToString::to_string))?;
        state.serialize_field("kind", &self.kind)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Error)]
    #[error("too small")]
    struct TooSmall;

    #[test]
    fn display_joins_field_and_message() {
        let err = FieldError::missing("age", &FieldType::Int);
        assert_eq!(err.to_string(), "age:Missing required field.");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
    }

    #[test]
    fn under_prefixes_path_and_keeps_details() {
        let err = FieldError::new(
            "city",
            Value::from(3),
            Some(FieldType::Text),
            ErrorKind::ValidatorFailure,
            "validation failed",
        )
        .with_cause(TooSmall)
        .under("address");

        assert_eq!(err.field(), "address.city");
        assert_eq!(err.value(), &Value::from(3));
        assert_eq!(err.message(), "validation failed");
        assert_eq!(err.kind(), ErrorKind::ValidatorFailure);
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("too small"));
    }

    #[test]
    fn unexpected_names_every_leftover_key() {
        let mut rest = Map::new();
        rest.insert("zz".to_string(), Value::from(1));
        rest.insert("yy".to_string(), Value::Null);
        let err = FieldError::unexpected(rest);
        assert_eq!(err.field(), BASE_FIELD);
        assert_eq!(err.message(), "Unexpected fields: zz, yy");
        assert!(err.expected().is_none());
    }

    #[test]
    fn structured_form_renders_cause_as_text() {
        let err = FieldError::null_not_allowed("name", &FieldType::Text).with_cause(TooSmall);
        assert_eq!(
            err.to_json(),
            json!({
                "field": "name",
                "value": null,
                "expected": "str",
                "message": "None not allowed",
                "cause": "too small",
                "kind": "null_not_allowed",
            })
        );
        assert_eq!(serde_json::to_value(&err).unwrap(), err.to_json());
    }
}
