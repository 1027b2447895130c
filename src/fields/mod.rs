//! Field declarations and the descriptor protocol.
//!
//! A `FieldSpec` is the unit of schema: one field's expected type, default,
//! nullability and optional custom validator. Model builders bind each spec
//! to the name it is declared under; afterwards the spec drives
//! get/set/delete against an instance's storage.
//!
//! The expected type selects the behavior:
//! - primitive kinds (`bool`, `int`, `float`, `str`, `any`) coerce, type
//!   check and run the custom validator
//! - `list[T]` fields validate every item and report failures per index
//! - model fields construct the nested model from a mapping and flatten its
//!   failures into dotted paths
//!
//! # Example
//!
//! ```rust
//! use modelkit::{FieldSpec, Value};
//!
//! let age = FieldSpec::int().validator(|v: &Value| match v.as_i64() {
//!     Some(n) if n >= 0 => Ok(()),
//!     _ => Err("age must be non-negative".into()),
//! });
//!
//! assert_eq!(age.validate(Value::from("21")).unwrap(), Value::from(21));
//! assert!(age.validate(Value::from(-1)).is_err());
//! ```

mod coerce;
mod descriptor;
pub mod error;
mod list;
mod nested;

pub use error::CoercionError;

use crate::core::{FieldType, Value};
use crate::model::ModelType;
use crate::validation::BoxError;
use std::fmt;
use std::sync::Arc;

/// Custom post-coercion check.
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), BoxError> + Send + Sync>;

/// Declaration of one field's contract.
#[derive(Clone)]
pub struct FieldSpec {
    expected: FieldType,
    default: Option<Value>,
    allow_none: bool,
    validator: Option<Validator>,
    name: Option<String>,
}

impl FieldSpec {
    /// Create a field expecting `expected`.
    pub fn new(expected: FieldType) -> Self {
        Self {
            expected,
            default: None,
            allow_none: false,
            validator: None,
            name: None,
        }
    }

    pub fn bool() -> Self {
        Self::new(FieldType::Bool)
    }

    pub fn int() -> Self {
        Self::new(FieldType::Int)
    }

    pub fn float() -> Self {
        Self::new(FieldType::Float)
    }

    pub fn text() -> Self {
        Self::new(FieldType::Text)
    }

    pub fn any() -> Self {
        Self::new(FieldType::Any)
    }

    /// List field whose items must satisfy `item`.
    pub fn list(item: FieldType) -> Self {
        Self::new(FieldType::list(item))
    }

    /// Nested-model field.
    pub fn model(model: &ModelType) -> Self {
        Self::new(FieldType::model(model))
    }

    /// Value reported by `get` while nothing is stored; makes the field
    /// optional. A null default is the same as no default.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into()).filter(|v| !v.is_null());
        self
    }

    /// Accept explicit null input; makes the field optional.
    pub fn allow_none(mut self) -> Self {
        self.allow_none = true;
        self
    }

    /// Add a custom check run on the coerced value.
    ///
    /// List and nested-model fields do not run it: their items and inner
    /// fields carry their own checks.
    pub fn validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(check));
        self
    }

    /// Pre-bind a name. Model builders rebind it to the declared key.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expected_type(&self) -> &FieldType {
        &self.expected
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn allows_none(&self) -> bool {
        self.allow_none
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Bound name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Item type of a list field.
    pub fn item_type(&self) -> Option<&FieldType> {
        match &self.expected {
            FieldType::List(item) => Some(item),
            _ => None,
        }
    }

    /// Model type of a nested-model field.
    pub fn model_type(&self) -> Option<&ModelType> {
        match &self.expected {
            FieldType::Model(model) => Some(model),
            _ => None,
        }
    }

    /// A field with no default that rejects null must appear in input.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.allow_none
    }

    pub(crate) fn bind(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub(crate) fn is_bound_to(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Name used in error paths; unbound specs report an empty path.
    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("expected", &self.expected)
            .field("default", &self.default)
            .field("allow_none", &self.allow_none)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_nullability_make_fields_optional() {
        assert!(FieldSpec::int().is_required());
        assert!(!FieldSpec::int().default(0).is_required());
        assert!(!FieldSpec::int().allow_none().is_required());
        assert!(FieldSpec::int().default(Value::Null).is_required());
    }

    #[test]
    fn list_and_model_accessors() {
        let tags = FieldSpec::list(FieldType::Text).default(Vec::<Value>::new());
        assert_eq!(tags.item_type(), Some(&FieldType::Text));
        assert!(tags.model_type().is_none());
        assert_eq!(tags.default_value(), Some(&Value::List(vec![])));
    }

    #[test]
    fn binding_sets_name() {
        let mut field = FieldSpec::text().named("alias");
        assert!(field.is_bound_to("alias"));
        field.bind("title");
        assert_eq!(field.name(), Some("title"));
        assert!(!field.is_bound_to("alias"));
    }
}
