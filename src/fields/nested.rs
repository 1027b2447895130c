//! Nested-model fields.

use super::FieldSpec;
use crate::core::Value;
use crate::model::ModelType;
use crate::validation::{ErrorKind, ValidationError};

impl FieldSpec {
    /// Build `model` from a mapping, or accept an existing instance.
    ///
    /// Failures of the nested construction are re-rooted under this field's
    /// name (`address.city`) instead of being wrapped.
    pub(super) fn validate_nested(
        &self,
        model: &ModelType,
        raw: Value,
    ) -> Result<Value, ValidationError> {
        match raw {
            Value::Map(map) => model
                .construct(map)
                .map(Value::Model)
                .map_err(|err| err.with_prefix(self.label())),
            other if self.expected.accepts(&other) => Ok(other),
            other => {
                let message = format!("expected {} or dict", model.name());
                Err(self.failure(other, ErrorKind::TypeMismatch, message).into())
            }
        }
    }
}
