//! Declaration errors for model builders.

use thiserror::Error;

/// Errors that can occur when assembling a model type.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Model name not specified. Pass a non-empty name to ModelBuilder::new")]
    MissingModelName,

    #[error("Model '{model}' declares a field with an empty name")]
    EmptyFieldName { model: String },

    #[error("Model '{model}' cannot declare reserved field name '{field}'")]
    ReservedFieldName { model: String, field: String },

    #[error("Model '{model}' declares field '{field}' more than once")]
    DuplicateField { model: String, field: String },
}
