//! Coercion error types.

use thiserror::Error;

/// Reasons a raw value could not be converted toward a field's type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoercionError {
    #[error("invalid literal for int: {0:?}")]
    InvalidInteger(String),

    #[error("invalid literal for float: {0:?}")]
    InvalidFloat(String),

    #[error("non-finite float {0} is not supported")]
    NonFiniteFloat(f64),

    #[error("float {0} is out of int range")]
    OutOfRange(f64),

    #[error("cannot convert {found} to {target}")]
    Unsupported { found: &'static str, target: String },

    #[error("Cannot coerce to list.")]
    NotASequence,
}
