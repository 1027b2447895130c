//! get/set/delete and the primitive validation path.

use super::coerce::coerce;
use super::FieldSpec;
use crate::core::{FieldType, Map, Value};
use crate::validation::{ErrorKind, FieldError, ValidationError};
use std::sync::Arc;

static NULL: Value = Value::Null;

impl FieldSpec {
    /// Validate a raw value without storing it.
    ///
    /// Returns the value that `set` would store. Null input is accepted
    /// only when the field allows none.
    pub fn validate(&self, raw: Value) -> Result<Value, ValidationError> {
        if raw.is_null() {
            return if self.allow_none {
                Ok(Value::Null)
            } else {
                Err(FieldError::null_not_allowed(self.label(), &self.expected).into())
            };
        }

        match &self.expected {
            FieldType::List(item) => self.validate_list(item, raw),
            FieldType::Model(model) => self.validate_nested(model, raw),
            _ => self.validate_primitive(raw),
        }
    }

    /// Coerce, type check, then run the custom validator.
    fn validate_primitive(&self, raw: Value) -> Result<Value, ValidationError> {
        let coerced = match coerce(&raw, &self.expected) {
            Ok(coerced) => coerced,
            Err(cause) => {
                return Err(self
                    .failure(raw, ErrorKind::CoercionFailure, "coercion failed")
                    .with_cause(cause)
                    .into())
            }
        };

        if !self.expected.accepts(&coerced) {
            let message = format!("expected {}", self.expected);
            return Err(self.failure(raw, ErrorKind::TypeMismatch, message).into());
        }

        if let Some(check) = &self.validator {
            if let Err(cause) = check(&coerced) {
                return Err(self
                    .failure(coerced, ErrorKind::ValidatorFailure, "validation failed")
                    .with_shared_cause(Arc::from(cause))
                    .into());
            }
        }

        Ok(coerced)
    }

    pub(super) fn failure(
        &self,
        value: Value,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> FieldError {
        FieldError::new(
            self.label(),
            value,
            Some(self.expected.clone()),
            kind,
            message,
        )
    }

    /// Stored value, else the default, else null.
    pub(crate) fn get<'a>(&'a self, store: &'a Map) -> &'a Value {
        store
            .get(self.label())
            .or(self.default.as_ref())
            .unwrap_or(&NULL)
    }

    /// Validate `raw` and store it; storage is untouched on failure.
    pub(crate) fn set(&self, store: &mut Map, raw: Value) -> Result<(), ValidationError> {
        let value = self.validate(raw)?;
        store.insert(self.label().to_string(), value);
        Ok(())
    }

    pub(crate) fn delete(&self, store: &mut Map) {
        store.shift_remove(self.label());
    }
}
