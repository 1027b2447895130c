//! List-valued fields.

use super::coerce::{coerce, to_list};
use super::FieldSpec;
use crate::core::{FieldType, Value};
use crate::validation::{ErrorKind, FieldError, ValidationError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type ItemCheck = Validation<(), NonEmptyVec<FieldError>>;

impl FieldSpec {
    /// Accept a list or tuple and check every item against `item`.
    ///
    /// All item failures are reported together, one per index. Items are
    /// only probed: the stored list keeps the original items.
    pub(super) fn validate_list(
        &self,
        item: &FieldType,
        raw: Value,
    ) -> Result<Value, ValidationError> {
        let items = match to_list(&raw) {
            Ok(items) => items,
            Err(cause) => {
                return Err(self
                    .failure(raw, ErrorKind::CoercionFailure, "coercion to list failed.")
                    .with_cause(cause)
                    .into())
            }
        };

        let name = self.label();
        let checks: Vec<ItemCheck> = items
            .iter()
            .enumerate()
            .map(|(index, value)| check_item(format!("{name}[{index}]"), index, value, item))
            .collect();

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(Value::List(items)),
            Validation::Failure(errors) => Err(errors.into()),
        }
    }
}

fn check_item(path: String, index: usize, value: &Value, item_type: &FieldType) -> ItemCheck {
    // Float items still go through the probe, which rejects non-finite values.
    if item_type.accepts(value) && !matches!(item_type, FieldType::List(_) | FieldType::Float) {
        return Validation::success(());
    }

    match item_type {
        FieldType::Any => Validation::success(()),
        FieldType::Model(model) => match value {
            Value::Map(map) => match model.construct(map.clone()) {
                Ok(_) => Validation::success(()),
                Err(err) => {
                    let message = err.to_string();
                    Validation::fail(item_failure(path, value, item_type, message).with_cause(err))
                }
            },
            _ => {
                let message = format!("list item at {index} expected {item_type}");
                Validation::fail(item_failure(path, value, item_type, message))
            }
        },
        FieldType::List(inner) => match value.as_slice() {
            Some(children) => {
                let checks: Vec<ItemCheck> = children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| check_item(format!("{path}[{i}]"), i, child, inner))
                    .collect();
                Validation::all_vec(checks).map(|_| ())
            }
            None => {
                let message = format!("list item at {index} expected {item_type}");
                Validation::fail(item_failure(path, value, item_type, message))
            }
        },
        primitive => match coerce(value, primitive) {
            Ok(_) => Validation::success(()),
            Err(cause) => {
                let message = cause.to_string();
                Validation::fail(item_failure(path, value, item_type, message).with_cause(cause))
            }
        },
    }
}

fn item_failure(path: String, value: &Value, item_type: &FieldType, message: String) -> FieldError {
    FieldError::new(
        path,
        value.clone(),
        Some(item_type.clone()),
        ErrorKind::ListItemFailure,
        message,
    )
}
