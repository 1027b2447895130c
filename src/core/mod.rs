//! Core value types.
//!
//! This module contains the data every other layer speaks:
//! - `Value`, the dynamic value handed to and stored by models
//! - `FieldType`, the closed set of types a field can expect
//!
//! Nothing in here performs validation; it only describes values and
//! answers "is this already an instance of that type".

mod kind;
mod value;

pub use kind::FieldType;
pub use value::{Map, Value};
