//! Modelkit: declarative data models with coercion and validation
//!
//! A model is declared once as an ordered registry of typed field specs.
//! Constructing an instance from a raw mapping coerces each value to its
//! declared type, runs the field's validator and collects every failure
//! before reporting. Errors are accumulated with Stillwater's `Validation`
//! rather than short-circuiting on the first bad field.
//!
//! # Core Concepts
//!
//! - **FieldSpec**: Expected type, default, null handling and validator
//! - **ModelType**: Immutable registry merged from base models and declarations
//! - **Instance**: Validated values with `dict` and JSON export
//! - **ValidationError**: Every field failure from one construction
//!
//! # Example
//!
//! ```rust
//! use modelkit::{model, ErrorKind, FieldSpec, Value};
//!
//! let point = model!(Point {
//!     x: FieldSpec::int(),
//!     y: FieldSpec::int().default(0),
//! })
//! .unwrap();
//!
//! let p = point.construct([("x", Value::from("3"))]).unwrap();
//! assert_eq!(p.to_string(), "Point(x=3, y=0)");
//!
//! let err = point
//!     .construct([("x", Value::from("three")), ("z", Value::from(1))])
//!     .unwrap_err();
//! assert_eq!(err.fields(), vec!["x", "__base__"]);
//! assert_eq!(err.errors()[0].kind(), ErrorKind::CoercionFailure);
//! ```

pub mod builder;
pub mod core;
pub mod fields;
pub mod model;
pub mod validation;

// Re-export commonly used types
pub use builder::{ModelBuilder, SchemaError};
pub use core::{FieldType, Map, Value};
pub use fields::{CoercionError, FieldSpec, Validator};
pub use model::{Instance, JsonOptions, ModelError, ModelType};
pub use validation::{BoxError, ErrorKind, FieldError, SharedError, ValidationError, BASE_FIELD};
