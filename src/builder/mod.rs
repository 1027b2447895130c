//! Builder API for declaring model types.
//!
//! This module provides a fluent builder and a macro that assemble a model's
//! field registry once, at declaration time. The resulting `ModelType` is
//! immutable; deriving a new model never changes its bases.

pub mod error;
pub mod macros;
pub mod model;

pub use error::SchemaError;
pub use model::ModelBuilder;

use crate::fields::FieldSpec;
use crate::model::ModelType;

/// Declare a model whose fields are all required text fields.
///
/// # Example
///
/// ```
/// use modelkit::builder::text_model;
/// use modelkit::Value;
///
/// let address = text_model("Address", ["street", "city"]).unwrap();
/// let home = address
///     .construct([("street", Value::from("X")), ("city", Value::from("Y"))])
///     .unwrap();
/// assert_eq!(home.get("city"), Some(&Value::from("Y")));
/// ```
pub fn text_model<I, K>(name: &str, fields: I) -> Result<ModelType, SchemaError>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    ModelBuilder::new(name)
        .fields(fields.into_iter().map(|field| (field, FieldSpec::text())))
        .build()
}

/// Declare a model that adds `fields` on top of `base`.
///
/// # Example
///
/// ```
/// use modelkit::builder::{derived_model, text_model};
/// use modelkit::FieldSpec;
///
/// let base = text_model("Named", ["name"]).unwrap();
/// let pet = derived_model("Pet", &base, [("legs", FieldSpec::int())]).unwrap();
/// assert!(pet.is_subtype_of(&base));
/// ```
pub fn derived_model<I, K>(name: &str, base: &ModelType, fields: I) -> Result<ModelType, SchemaError>
where
    I: IntoIterator<Item = (K, FieldSpec)>,
    K: Into<String>,
{
    ModelBuilder::new(name).extends(base).fields(fields).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldType;

    #[test]
    fn text_model_builds_required_text_fields() {
        let model = text_model("Tag", ["key", "value"]).unwrap();
        assert!(model
            .fields()
            .all(|(_, spec)| spec.is_required() && spec.expected_type() == &FieldType::Text));
    }

    #[test]
    fn derived_model_overrides_base() {
        let base = text_model("Base", ["id", "label"]).unwrap();
        let derived = derived_model("Derived", &base, [("id", FieldSpec::int())]).unwrap();
        assert_eq!(derived.field("id").unwrap().expected_type(), &FieldType::Int);
        assert_eq!(derived.field("label").unwrap().expected_type(), &FieldType::Text);
    }
}
