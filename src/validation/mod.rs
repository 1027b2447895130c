//! Error model for field validation.
//!
//! A `FieldError` records one failing field; a `ValidationError` is the
//! ordered, non-empty aggregate raised at a validation boundary.
//!
//! Construction does not stop at the first failing field: every failure is
//! collected and reported in one shot, in field-declaration order. Nested
//! model failures are flattened into dotted paths (`address.city`) and list
//! item failures carry their index (`tags[2]`).
//!
//! # Example
//!
//! ```rust
//! use modelkit::{ErrorKind, FieldError, FieldType, ValidationError, Value};
//!
//! let err = ValidationError::from(FieldError::new(
//!     "age",
//!     Value::from("abc"),
//!     Some(FieldType::Int),
//!     ErrorKind::CoercionFailure,
//!     "coercion failed",
//! ));
//! assert_eq!(err.to_string(), "1 validation error(s): age:coercion failed");
//! ```

mod aggregate;
mod field_error;

pub use aggregate::ValidationError;
pub use field_error::{BoxError, ErrorKind, FieldError, SharedError, BASE_FIELD};
