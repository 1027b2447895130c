//! Ordered aggregate of field failures.

use super::field_error::FieldError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

type Iter<'a> = std::iter::Chain<std::iter::Once<&'a FieldError>, std::slice::Iter<'a, FieldError>>;

/// Every field failure from one validation boundary, in failure order.
///
/// Never empty: failures are held in a `NonEmptyVec`.
#[derive(Debug, Clone, Error)]
#[error("{} validation error(s): {}", .errors.len(), summarize(.errors.iter()))]
pub struct ValidationError {
    errors: NonEmptyVec<FieldError>,
}

fn summarize<'a>(errors: impl Iterator<Item = &'a FieldError>) -> String {
    errors
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build from a list of failures; `None` when the list is empty.
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self::from)
    }

    /// Failures in order; index with `errors()[i]`.
    pub fn errors(&self) -> &NonEmptyVec<FieldError> {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        std::iter::once(self.errors.head()).chain(self.errors.tail().iter())
    }

    /// Field paths of all failures, in order.
    pub fn fields(&self) -> Vec<&str> {
        self.iter().map(FieldError::field).collect()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors.into_vec()
    }

    /// Re-root every failure under `outer` (dotted-path flattening).
    pub fn with_prefix(self, outer: &str) -> Self {
        Self {
            errors: self.errors.map(|e| e.under(outer)),
        }
    }

    /// Structured form: `{errors: [...]}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.iter().map(FieldError::to_json).collect::<Vec<_>>(),
        })
    }

    /// Lift into the accumulating `Validation` used during construction.
    pub(crate) fn into_failure<T>(self) -> Validation<T, NonEmptyVec<FieldError>> {
        Validation::Failure(self.errors)
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self {
            errors: NonEmptyVec::singleton(error),
        }
    }
}

impl From<NonEmptyVec<FieldError>> for ValidationError {
    fn from(errors: NonEmptyVec<FieldError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationError {
    type Item = FieldError;
    type IntoIter = <NonEmptyVec<FieldError> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a FieldError;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 1)?;
        state.serialize_field("errors", &self.iter().collect::<Vec<_>>())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldType, Value};
    use crate::validation::ErrorKind;

    fn failure(field: &str, message: &str) -> FieldError {
        FieldError::new(
            field,
            Value::Null,
            Some(FieldType::Int),
            ErrorKind::TypeMismatch,
            message,
        )
    }

    #[test]
    fn empty_list_is_not_an_aggregate() {
        assert!(ValidationError::new(Vec::new()).is_none());
    }

    #[test]
    fn summary_counts_and_lists_in_order() {
        let err = ValidationError::new(vec![failure("a", "bad a"), failure("b", "bad b")]).unwrap();
        assert_eq!(err.to_string(), "2 validation error(s): a:bad a; b:bad b");
        assert_eq!(err.fields(), vec!["a", "b"]);
    }

    #[test]
    fn prefix_applies_to_every_failure() {
        let err = ValidationError::new(vec![failure("x", "m"), failure("y[1]", "m")])
            .unwrap()
            .with_prefix("outer");
        assert_eq!(err.fields(), vec!["outer.x", "outer.y[1]"]);
    }

    #[test]
    fn failure_roundtrips_through_validation() {
        let err = ValidationError::new(vec![failure("a", "1"), failure("b", "2")]).unwrap();
        match err.into_failure::<()>() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                let back = ValidationError::from(errors);
                assert_eq!(back.fields(), vec!["a", "b"]);
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn conversion_from_nonempty_keeps_order() {
        let errors = NonEmptyVec::new(failure("a", "1"), vec![failure("b", "2"), failure("c", "3")]);
        let err = ValidationError::from(errors);
        assert_eq!(err.len(), 3);
        assert!(!err.is_empty());
        assert_eq!(err.errors()[2].field(), "c");
        let owned: Vec<String> = err.into_iter().map(|e| e.field().to_string()).collect();
        assert_eq!(owned, vec!["a", "b", "c"]);
    }

    #[test]
    fn structured_form_keeps_order() {
        let err = ValidationError::new(vec![failure("a", "1"), failure("b", "2")]).unwrap();
        let json = err.to_json();
        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "a");
        assert_eq!(errors[1]["field"], "b");
    }
}
