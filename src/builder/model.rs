//! Builder that assembles a model's field registry.

use crate::builder::error::SchemaError;
use crate::fields::FieldSpec;
use crate::model::{ModelDef, ModelType, Registry};
use crate::validation::BASE_FIELD;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Builder for declaring model types with a fluent API.
pub struct ModelBuilder {
    name: String,
    bases: Vec<ModelType>,
    declared: Vec<(String, FieldSpec)>,
}

impl ModelBuilder {
    /// Create a new builder for a model called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            declared: Vec::new(),
        }
    }

    /// Inherit every field of `base`. Bases merge in the order added.
    pub fn extends(mut self, base: &ModelType) -> Self {
        self.bases.push(base.clone());
        self
    }

    /// Declare a field; it overrides any inherited field of the same name.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.declared.push((name.into(), spec));
        self
    }

    /// Add several declarations at once.
    pub fn fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldSpec)>,
        K: Into<String>,
    {
        self.declared
            .extend(fields.into_iter().map(|(name, spec)| (name.into(), spec)));
        self
    }

    /// Assemble the registry and freeze it into a model type.
    ///
    /// Base registries merge first, in order; declared fields then replace
    /// inherited entries of the same name, keeping the inherited position.
    /// Every entry ends up bound to its registry key.
    pub fn build(self) -> Result<ModelType, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingModelName);
        }

        let mut fields = Registry::new();
        for base in &self.bases {
            for (name, spec) in base.registry() {
                fields.insert(name.clone(), Arc::clone(spec));
            }
        }

        let mut seen = HashSet::new();
        for (name, mut spec) in self.declared {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName { model: self.name });
            }
            if name == BASE_FIELD {
                return Err(SchemaError::ReservedFieldName {
                    model: self.name,
                    field: name,
                });
            }
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateField {
                    model: self.name,
                    field: name,
                });
            }
            if !spec.is_bound_to(&name) {
                spec.bind(&name);
            }
            fields.insert(name, Arc::new(spec));
        }

        debug!(
            model = %self.name,
            fields = fields.len(),
            bases = self.bases.len(),
            "assembled field registry"
        );

        Ok(ModelType::from_def(ModelDef {
            name: self.name,
            bases: self.bases,
            fields,
        }))
    }
}
