//! Closed set of types a field can expect.

use super::value::Value;
use crate::model::ModelType;
use serde::{Serialize, Serializer};
use std::fmt;

/// Expected type of a field or of a list item.
///
/// `List` and `Model` select the list and nested-model field behavior;
/// the remaining variants are primitive kinds.
///
/// # Example
///
/// ```rust
/// use modelkit::{FieldType, Value};
///
/// let tags = FieldType::list(FieldType::Text);
/// assert_eq!(tags.to_string(), "list[str]");
/// assert!(FieldType::Int.accepts(&Value::from(3)));
/// assert!(!FieldType::Int.accepts(&Value::from("3")));
/// ```
#[derive(Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Text,
    Any,
    List(Box<FieldType>),
    Model(ModelType),
}

impl FieldType {
    pub fn list(item: FieldType) -> Self {
        Self::List(Box::new(item))
    }

    pub fn model(model: &ModelType) -> Self {
        Self::Model(model.clone())
    }

    /// True for the kinds coerced through their constructor.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::Text)
    }

    /// Whether `value` is already an instance of this type.
    ///
    /// Model types also accept instances of models derived from them.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Text, Value::Text(_))
            | (Self::List(_), Value::List(_)) => true,
            (Self::Model(model), Value::Model(instance)) => {
                instance.model().is_subtype_of(model)
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("str"),
            Self::Any => f.write_str("any"),
            Self::List(item) => write!(f, "list[{item}]"),
            Self::Model(model) => f.write_str(model.name()),
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldType({self})")
    }
}

/// Serialized by name, as in the structured error form.
impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
