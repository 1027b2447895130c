//! Dynamic values flowing into and out of models.
//!
//! `Value` is both the raw input handed to construction and the coerced
//! value held in instance storage. Raw input is usually built from
//! `serde_json::Value` or from Rust scalars through the `From` impls.

use crate::model::Instance;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Ordered mapping of text keys to values.
pub type Map = IndexMap<String, Value>;

/// A dynamically typed value.
///
/// # Example
///
/// ```rust
/// use modelkit::Value;
///
/// let v = Value::from("21");
/// assert_eq!(v.type_name(), "str");
/// assert!(v.is_truthy());
/// assert!(!Value::from(0).is_truthy());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    /// Fixed ordered sequence; list fields accept it and store it as a list.
    Tuple(Vec<Value>),
    Map(Map),
    Model(Instance),
}

impl Value {
    /// Short name of the value's variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
            Self::Model(_) => "model",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Generic truthiness: empty and zero values are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) | Self::Tuple(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
            Self::Model(_) => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Items of a list or tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Instance> {
        match self {
            Self::Model(instance) => Some(instance),
            _ => None,
        }
    }

    /// Deep copy with every nested model instance replaced by its mapping
    /// export, and tuples turned into lists.
    pub fn exported(&self) -> Value {
        match self {
            Self::List(items) | Self::Tuple(items) => {
                Self::List(items.iter().map(Value::exported).collect())
            }
            Self::Map(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.exported()))
                    .collect(),
            ),
            Self::Model(instance) => Self::Map(instance.dict()),
            other => other.clone(),
        }
    }

    /// Convert into the interchange representation.
    ///
    /// Non-finite floats have no interchange form and become null here;
    /// `Instance::json_with` and `Serialize` report them as errors instead.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::List(items) | Self::Tuple(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Model(instance) => instance.to_json_value(),
        }
    }

    /// Debug-style rendering: text is quoted, containers show their items.
    pub(crate) fn repr(&self) -> Repr<'_> {
        Repr(self)
    }
}

/// Rendering used inside containers and for instance `Display`.
pub(crate) struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::List(items) => write_items(f, items, "[", "]"),
            Value::Tuple(items) => write_items(f, items, "(", ")"),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {}", v.repr())?;
                }
                f.write_str("}")
            }
            Value::Model(instance) => write!(f, "{instance}"),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value], open: &str, close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item.repr())?;
    }
    f.write_str(close)
}

/// Text renders verbatim; every other value renders as its repr.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            other => write!(f, "{}", other.repr()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if !f.is_finite() => Err(<S::Error as serde::ser::Error>::custom(
                format_args!("non-finite float {f} has no interchange form"),
            )),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) | Self::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
            Self::Model(instance) => instance.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Self::Model(instance)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_conversion_preserves_key_order() {
        let value = Value::from(json!({"b": 1, "a": [true, null], "c": 2.5}));
        let map = value.as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(map["a"], Value::List(vec![Value::Bool(true), Value::Null]));
        assert_eq!(map["c"], Value::Float(2.5));
    }

    #[test]
    fn truthiness_follows_emptiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("no").is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(Value::Tuple(vec![Value::Null]).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(Value::from(-1).is_truthy());
    }

    #[test]
    fn display_keeps_text_verbatim_and_quotes_nested_text() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        let list = Value::List(vec![Value::from("a"), Value::from(1), Value::from(1.0)]);
        assert_eq!(list.to_string(), "[\"a\", 1, 1.0]");
    }

    #[test]
    fn tuples_export_as_lists() {
        let tuple = Value::Tuple(vec![Value::from(1), Value::from(2)]);
        assert_eq!(tuple.exported(), Value::List(vec![Value::from(1), Value::from(2)]));
        assert_eq!(tuple.to_json(), json!([1, 2]));
    }

    #[test]
    fn serializes_like_interchange_form() {
        let mut map = Map::new();
        map.insert("x".to_string(), Value::from("y"));
        map.insert("n".to_string(), Value::Null);
        let text = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(text, r#"{"x":"y","n":null}"#);
    }

    #[test]
    fn non_finite_floats_do_not_serialize() {
        let list = Value::List(vec![Value::from(1.0), Value::from(f64::NAN)]);
        assert!(serde_json::to_string(&list).is_err());
        assert_eq!(list.to_json(), json!([1.0, null]));
    }
}
