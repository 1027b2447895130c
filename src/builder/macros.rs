//! Macros for ergonomic model declaration.

/// Declare a model type from field specs.
///
/// Expands to a `ModelBuilder` chain and evaluates to
/// `Result<ModelType, SchemaError>`. Base models listed after `:` are
/// merged in order before the declared fields.
///
/// # Example
///
/// ```
/// use modelkit::{model, FieldSpec, FieldType, Value};
///
/// let person = model!(Person {
///     name: FieldSpec::text(),
///     age: FieldSpec::int().default(0),
/// })
/// .unwrap();
///
/// let employee = model!(Employee: person {
///     salary: FieldSpec::float(),
///     skills: FieldSpec::list(FieldType::Text).default(Vec::<Value>::new()),
/// })
/// .unwrap();
///
/// let names: Vec<&str> = employee.field_names().collect();
/// assert_eq!(names, vec!["name", "age", "salary", "skills"]);
/// ```
#[macro_export]
macro_rules! model {
    (
        $name:ident $(: $($base:ident),+ )? {
            $( $field:ident : $spec:expr ),* $(,)?
        }
    ) => {
        $crate::builder::ModelBuilder::new(stringify!($name))
            $($( .extends(&$base) )+)?
            $( .field(stringify!($field), $spec) )*
            .build()
    };
}
