//! Usage errors raised by model entry points.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors from the model-level API.
///
/// Only `Validation` describes bad data; the other variants are misuse of
/// the API and are never folded into a `ValidationError`.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{model} expects a mapping, got {found}")]
    NotAMapping { model: String, found: &'static str },

    #[error("{model} has no field named {field:?}")]
    UnknownField { model: String, field: String },

    #[error("{model}.{field} holds non-finite float {value}, which JSON cannot represent")]
    NonFiniteFloat {
        model: String,
        field: String,
        value: f64,
    },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
