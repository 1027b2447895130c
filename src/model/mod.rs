//! Model types and their instances.
//!
//! A `ModelType` is an assembled, immutable field registry: an ordered
//! mapping of field name to `FieldSpec`, merged from base models and the
//! model's own declarations. It is cheap to clone and shared by every
//! instance, so instances may be constructed from many threads at once.
//!
//! # Example
//!
//! ```rust
//! use modelkit::{FieldSpec, FieldType, ModelBuilder, Value};
//! use serde_json::json;
//!
//! let address = ModelBuilder::new("Address")
//!     .field("street", FieldSpec::text())
//!     .field("city", FieldSpec::text())
//!     .build()
//!     .unwrap();
//!
//! let user = ModelBuilder::new("User")
//!     .field("name", FieldSpec::text())
//!     .field("age", FieldSpec::int())
//!     .field("address", FieldSpec::model(&address))
//!     .field("tags", FieldSpec::list(FieldType::Text).default(Vec::<Value>::new()))
//!     .build()
//!     .unwrap();
//!
//! let manya = user
//!     .parse_obj(Value::from(json!({
//!         "name": "Manya",
//!         "age": "21",
//!         "address": {"street": "X", "city": "New Delhi"},
//!     })))
//!     .unwrap();
//!
//! assert_eq!(manya.get("age"), Some(&Value::from(21)));
//! assert_eq!(
//!     manya.to_json_value(),
//!     json!({
//!         "name": "Manya",
//!         "age": 21,
//!         "address": {"street": "X", "city": "New Delhi"},
//!         "tags": [],
//!     })
//! );
//! ```

mod construct;
pub mod error;
mod export;
mod instance;

pub use error::ModelError;
pub use export::JsonOptions;
pub use instance::Instance;

use crate::core::Value;
use crate::fields::FieldSpec;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Ordered, immutable field registry.
pub(crate) type Registry = IndexMap<String, Arc<FieldSpec>>;

pub(crate) struct ModelDef {
    pub(crate) name: String,
    pub(crate) bases: Vec<ModelType>,
    pub(crate) fields: Registry,
}

/// A declared model type. Clones share the same registry.
#[derive(Clone)]
pub struct ModelType {
    def: Arc<ModelDef>,
}

impl ModelType {
    pub(crate) fn from_def(def: ModelDef) -> Self {
        Self { def: Arc::new(def) }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Direct base models, in declaration order.
    pub fn bases(&self) -> &[ModelType] {
        &self.def.bases
    }

    /// Registry entries in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.def
            .fields
            .iter()
            .map(|(name, spec)| (name.as_str(), spec.as_ref()))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.def.fields.get(name).map(Arc::as_ref)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.def.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.def.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.def.fields.is_empty()
    }

    /// True when `self` is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &ModelType) -> bool {
        self == other || self.bases().iter().any(|base| base.is_subtype_of(other))
    }

    /// Parse JSON text and construct through `parse_obj`.
    pub fn parse_json(&self, text: &str) -> Result<Instance, ModelError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        self.parse_obj(Value::from(json))
    }

    /// Explicit-mapping entry point: non-mapping input is a usage error.
    pub fn parse_obj(&self, obj: Value) -> Result<Instance, ModelError> {
        match obj {
            Value::Map(map) => Ok(self.construct(map)?),
            other => Err(ModelError::NotAMapping {
                model: self.name().to_string(),
                found: other.type_name(),
            }),
        }
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.def.fields
    }
}

/// Model types compare by identity.
impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def)
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.def.name)
            .field("bases", &self.def.bases.iter().map(ModelType::name).collect::<Vec<_>>())
            .field("fields", &self.def.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.def.name)
    }
}
