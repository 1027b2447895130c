//! Best-effort conversion of raw values toward a field type.

use super::error::CoercionError;
use crate::core::{FieldType, Value};

const TRUE_WORDS: [&str; 5] = ["true", "1", "yes", "y", "t"];
const FALSE_WORDS: [&str; 5] = ["false", "0", "no", "n", "f"];

/// Coerce `value` toward `target`.
///
/// Values that already are instances of `target` pass through unchanged.
/// Model targets also pass through: nested validation belongs to the
/// nested-model field.
pub(crate) fn coerce(value: &Value, target: &FieldType) -> Result<Value, CoercionError> {
    if let (FieldType::Float, Value::Float(f)) = (target, value) {
        if !f.is_finite() {
            return Err(CoercionError::NonFiniteFloat(*f));
        }
    }
    if target.accepts(value) {
        return Ok(value.clone());
    }

    match target {
        FieldType::Bool => Ok(Value::Bool(to_bool(value))),
        FieldType::Int => to_int(value).map(Value::Int),
        FieldType::Float => to_float(value).map(Value::Float),
        FieldType::Text => Ok(Value::Text(value.to_string())),
        FieldType::Model(_) => Ok(value.clone()),
        FieldType::List(_) => to_list(value).map(Value::List),
        FieldType::Any => Ok(value.clone()),
    }
}

/// Text goes through the word table; anything else, including
/// unrecognized text, falls back to truthiness.
fn to_bool(value: &Value) -> bool {
    if let Value::Text(s) = value {
        let word = s.trim().to_lowercase();
        if TRUE_WORDS.contains(&word.as_str()) {
            return true;
        }
        if FALSE_WORDS.contains(&word.as_str()) {
            return false;
        }
    }
    value.is_truthy()
}

fn to_int(value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoercionError::InvalidInteger(s.clone())),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(CoercionError::NonFiniteFloat(*f));
            }
            let truncated = f.trunc();
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(CoercionError::OutOfRange(*f));
            }
            Ok(truncated as i64)
        }
        other => Err(unsupported(other, &FieldType::Int)),
    }
}

fn to_float(value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Ok(*i as f64),
        Value::Text(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            Ok(f) => Err(CoercionError::NonFiniteFloat(f)),
            Err(_) => Err(CoercionError::InvalidFloat(s.clone())),
        },
        other => Err(unsupported(other, &FieldType::Float)),
    }
}

/// Lists pass as-is, tuples become lists, anything else fails.
pub(crate) fn to_list(value: &Value) -> Result<Vec<Value>, CoercionError> {
    match value {
        Value::List(items) | Value::Tuple(items) => Ok(items.clone()),
        _ => Err(CoercionError::NotASequence),
    }
}

fn unsupported(value: &Value, target: &FieldType) -> CoercionError {
    CoercionError::Unsupported {
        found: value.type_name(),
        target: target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_word_table() {
        for word in ["true", " TRUE ", "1", "Yes", "y", "t\n"] {
            assert_eq!(coerce(&Value::from(word), &FieldType::Bool), Ok(Value::Bool(true)));
        }
        for word in ["false", "0", " no", "N", "F"] {
            assert_eq!(coerce(&Value::from(word), &FieldType::Bool), Ok(Value::Bool(false)));
        }
    }

    #[test]
    fn bool_falls_back_to_truthiness() {
        assert_eq!(coerce(&Value::from("maybe"), &FieldType::Bool), Ok(Value::Bool(true)));
        assert_eq!(coerce(&Value::from(""), &FieldType::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce(&Value::from(0), &FieldType::Bool), Ok(Value::Bool(false)));
        assert_eq!(coerce(&Value::from(2.5), &FieldType::Bool), Ok(Value::Bool(true)));
    }

    #[test]
    fn int_from_text_float_and_bool() {
        assert_eq!(coerce(&Value::from(" 21 "), &FieldType::Int), Ok(Value::Int(21)));
        assert_eq!(coerce(&Value::from(-3.9), &FieldType::Int), Ok(Value::Int(-3)));
        assert_eq!(coerce(&Value::from(true), &FieldType::Int), Ok(Value::Int(1)));
        assert_eq!(
            coerce(&Value::from("3.5"), &FieldType::Int),
            Err(CoercionError::InvalidInteger("3.5".to_string()))
        );
        assert!(coerce(&Value::from(f64::NAN), &FieldType::Int).is_err());
        assert_eq!(
            coerce(&Value::from(1e30), &FieldType::Int),
            Err(CoercionError::OutOfRange(1e30))
        );
    }

    #[test]
    fn int_rejects_containers() {
        let err = coerce(&Value::List(vec![]), &FieldType::Int).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert list to int");
    }

    #[test]
    fn float_from_text_and_int() {
        assert_eq!(coerce(&Value::from("2.5"), &FieldType::Float), Ok(Value::Float(2.5)));
        assert_eq!(coerce(&Value::from(4), &FieldType::Float), Ok(Value::Float(4.0)));
        assert!(coerce(&Value::from("two"), &FieldType::Float).is_err());
        assert!(coerce(&Value::Null, &FieldType::Float).is_err());
    }

    #[test]
    fn float_rejects_non_finite_values() {
        for word in ["inf", "-Infinity", " NaN "] {
            assert!(matches!(
                coerce(&Value::from(word), &FieldType::Float),
                Err(CoercionError::NonFiniteFloat(_))
            ));
        }
        assert!(matches!(
            coerce(&Value::from(f64::INFINITY), &FieldType::Float),
            Err(CoercionError::NonFiniteFloat(_))
        ));
        assert_eq!(coerce(&Value::from(1e308), &FieldType::Float), Ok(Value::Float(1e308)));
    }

    #[test]
    fn text_from_anything() {
        assert_eq!(coerce(&Value::from(5), &FieldType::Text), Ok(Value::from("5")));
        assert_eq!(coerce(&Value::from(false), &FieldType::Text), Ok(Value::from("false")));
        assert_eq!(coerce(&Value::from("as is"), &FieldType::Text), Ok(Value::from("as is")));
    }

    #[test]
    fn list_accepts_tuples_only_besides_lists() {
        let tuple = Value::Tuple(vec![Value::from(1)]);
        assert_eq!(to_list(&tuple), Ok(vec![Value::from(1)]));
        assert_eq!(to_list(&Value::from("abc")), Err(CoercionError::NotASequence));
    }

    #[test]
    fn any_passes_everything_through() {
        let map = Value::Map(Default::default());
        assert_eq!(coerce(&map, &FieldType::Any), Ok(map.clone()));
    }
}
