//! Validated model instances.

use super::{ModelError, ModelType};
use crate::core::{FieldType, Map, Value};
use crate::fields::FieldSpec;
use crate::validation::ValidationError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A validated instance of a model type.
///
/// Storage is private; every write goes through the field's descriptor, so
/// a stored value has always passed coercion and validation.
#[derive(Clone)]
pub struct Instance {
    model: ModelType,
    store: Map,
}

impl Instance {
    pub(crate) fn from_store(model: ModelType, store: Map) -> Self {
        Self { model, store }
    }

    pub fn model(&self) -> &ModelType {
        &self.model
    }

    /// Stored value, else the field's default, else null.
    ///
    /// `None` only when the model has no such field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.model.field(field).map(|spec| spec.get(&self.store))
    }

    /// Whether a value (possibly null) has been stored for `field`.
    pub fn is_set(&self, field: &str) -> bool {
        self.store.contains_key(field)
    }

    /// Validate and store a new value; on failure the old value stays.
    pub fn set(&mut self, field: &str, raw: impl Into<Value>) -> Result<(), ModelError> {
        let model = self.model.clone();
        let spec = Self::spec(&model, field)?;
        spec.set(&mut self.store, raw.into())?;
        Ok(())
    }

    /// Drop the stored value so `get` reports the default again.
    pub fn delete(&mut self, field: &str) -> Result<(), ModelError> {
        let model = self.model.clone();
        Self::spec(&model, field)?.delete(&mut self.store);
        Ok(())
    }

    fn spec<'m>(model: &'m ModelType, field: &str) -> Result<&'m FieldSpec, ModelError> {
        model.field(field).ok_or_else(|| ModelError::UnknownField {
            model: model.name().to_string(),
            field: field.to_string(),
        })
    }

    /// Export to an ordered mapping in field order; nested instances are
    /// exported recursively.
    pub fn dict(&self) -> Map {
        self.model
            .fields()
            .map(|(name, spec)| {
                let value = spec.get(&self.store);
                let exported = match (spec.expected_type(), value) {
                    (FieldType::Model(_), Value::Model(nested)) => Value::Map(nested.dict()),
                    _ => value.exported(),
                };
                (name.to_string(), exported)
            })
            .collect()
    }

    /// Build a new instance from this one's export overlaid with `updates`.
    ///
    /// The result goes through full construction; `self` is unchanged.
    pub fn copy_with<I, K, V>(&self, updates: I) -> Result<Instance, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut data = self.dict();
        for (key, value) in updates {
            data.insert(key.into(), value.into());
        }
        self.model.construct(data)
    }
}

/// Same model type and same stored values.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.store == other.store
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("model", &self.model.name())
            .field("store", &self.store)
            .finish()
    }
}

/// `Name(field=value, ...)` in field order.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.model.name())?;
        for (i, (name, spec)) in self.model.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={}", spec.get(&self.store).repr())?;
        }
        f.write_str(")")
    }
}

/// Serializes as the `dict` export.
impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let export = self.dict();
        let mut map = serializer.serialize_map(Some(export.len()))?;
        for (name, value) in &export {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::validation::ErrorKind;
    use serde_json::json;

    fn person() -> ModelType {
        let pet = ModelBuilder::new("Pet")
            .field("name", FieldSpec::text())
            .build()
            .unwrap();
        ModelBuilder::new("Person")
            .field("name", FieldSpec::text())
            .field("age", FieldSpec::int().default(0))
            .field("pet", FieldSpec::model(&pet).allow_none())
            .build()
            .unwrap()
    }

    fn ana() -> Instance {
        person()
            .parse_obj(Value::from(json!({"name": "Ana", "pet": {"name": "Rex"}})))
            .unwrap()
    }

    #[test]
    fn set_goes_through_coercion() {
        let mut p = ana();
        p.set("age", "33").unwrap();
        assert_eq!(p.get("age"), Some(&Value::from(33)));
    }

    #[test]
    fn failed_set_keeps_previous_value() {
        let mut p = ana();
        p.set("age", 5).unwrap();
        let err = p.set("age", "old").unwrap_err();
        match err {
            ModelError::Validation(errors) => {
                assert_eq!(errors.errors()[0].kind(), ErrorKind::CoercionFailure)
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert_eq!(p.get("age"), Some(&Value::from(5)));
    }

    #[test]
    fn unknown_fields_are_usage_errors() {
        let mut p = ana();
        assert!(p.get("nickname").is_none());
        assert!(matches!(p.set("nickname", "A"), Err(ModelError::UnknownField { .. })));
        assert!(matches!(p.delete("nickname"), Err(ModelError::UnknownField { .. })));
    }

    #[test]
    fn delete_restores_default() {
        let mut p = ana();
        p.set("age", 40).unwrap();
        p.delete("age").unwrap();
        assert!(!p.is_set("age"));
        assert_eq!(p.get("age"), Some(&Value::from(0)));
    }

    #[test]
    fn dict_exports_nested_instances() {
        let export = ana().dict();
        assert_eq!(
            Value::Map(export).to_json(),
            json!({"name": "Ana", "age": 0, "pet": {"name": "Rex"}})
        );
    }

    #[test]
    fn copy_with_revalidates() {
        let original = ana();
        let older = original.copy_with([("age", "12")]).unwrap();
        assert_eq!(older.get("age"), Some(&Value::from(12)));
        assert_eq!(original.get("age"), Some(&Value::from(0)));

        let err = original.copy_with([("age", "twelve")]).unwrap_err();
        assert_eq!(err.fields(), vec!["age"]);
    }

    #[test]
    fn display_renders_fields_in_order() {
        assert_eq!(ana().to_string(), r#"Person(name="Ana", age=0, pet=Pet(name="Rex"))"#);
    }
}
