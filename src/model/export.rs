//! Textual interchange export.

use super::{Instance, ModelError};
use crate::core::{Map, Value};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Formatting options for `Instance::json_with`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Pretty-print with this many spaces per level; compact when `None`.
    pub indent: Option<usize>,

    /// Emit object keys in sorted order instead of field order.
    pub sort_keys: bool,
}

impl JsonOptions {
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    pub fn sort_keys(mut self) -> Self {
        self.sort_keys = true;
        self
    }
}

impl Instance {
    /// The `dict` export as an interchange value.
    ///
    /// Non-finite floats (only reachable through `any` fields) become null;
    /// the text exports reject them.
    pub fn to_json_value(&self) -> serde_json::Value {
        object(&self.dict())
    }

    /// Compact JSON text of the `dict` export.
    pub fn json(&self) -> Result<String, ModelError> {
        self.json_with(&JsonOptions::default())
    }

    /// JSON text with the given formatting.
    ///
    /// Fails with `ModelError::NonFiniteFloat` instead of writing a value
    /// that would not read back.
    pub fn json_with(&self, options: &JsonOptions) -> Result<String, ModelError> {
        let export = self.dict();
        let bad = export
            .iter()
            .find_map(|(name, value)| find_non_finite(name.clone(), value));
        if let Some((field, value)) = bad {
            return Err(ModelError::NonFiniteFloat {
                model: self.model().name().to_string(),
                field,
                value,
            });
        }

        let mut value = object(&export);
        if options.sort_keys {
            sort_keys(&mut value);
        }

        match options.indent {
            None => Ok(serde_json::to_string(&value)?),
            Some(width) => {
                let indent = vec![b' '; width];
                let mut out = Vec::new();
                let mut ser =
                    Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
                value.serialize(&mut ser)?;
                Ok(String::from_utf8_lossy(&out).into_owned())
            }
        }
    }
}

fn object(export: &Map) -> serde_json::Value {
    serde_json::Value::Object(
        export
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

/// Path and value of the first non-finite float in an exported value.
fn find_non_finite(path: String, value: &Value) -> Option<(String, f64)> {
    match value {
        Value::Float(f) if !f.is_finite() => Some((path, *f)),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_non_finite(format!("{path}[{i}]"), item)),
        Value::Map(map) => map
            .iter()
            .find_map(|(key, item)| find_non_finite(format!("{path}.{key}"), item)),
        _ => None,
    }
}

fn sort_keys(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries.iter_mut().for_each(|(_, v)| sort_keys(v));
            *map = entries.into_iter().collect();
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}
