use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

/// Scalar or list value flowing through rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RuleValue>),
}

impl RuleValue {
    /// Converts JSON into a rule value. Objects have no value form.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(RuleValue::Null),
            Value::Bool(flag) => Some(RuleValue::Bool(*flag)),
            Value::Number(number) => number.as_f64().map(RuleValue::Number),
            Value::String(text) => Some(RuleValue::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(RuleValue::from_json)
                .collect::<Option<Vec<_>>>()
                .map(RuleValue::List),
            Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            RuleValue::Null => Value::Null,
            RuleValue::Bool(flag) => Value::Bool(*flag),
            RuleValue::Number(number) => number_to_json(*number),
            RuleValue::Text(text) => Value::String(text.clone()),
            RuleValue::List(items) => Value::Array(items.iter().map(RuleValue::to_json).collect()),
        }
    }

    /// Truthiness of a value used directly as a rule. Lists are truthy even when empty.
    pub fn truthy(&self) -> bool {
        match self {
            RuleValue::Null => false,
            RuleValue::Bool(flag) => *flag,
            RuleValue::Number(number) => *number != 0.0 && !number.is_nan(),
            RuleValue::Text(text) => !text.is_empty(),
            RuleValue::List(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RuleValue::Null)
    }

    /// Equality without type coercion: `5` never equals `"5"`.
    pub fn strict_eq(&self, other: &RuleValue) -> bool {
        match (self, other) {
            (RuleValue::Null, RuleValue::Null) => true,
            (RuleValue::Bool(a), RuleValue::Bool(b)) => a == b,
            (RuleValue::Number(a), RuleValue::Number(b)) => a == b,
            (RuleValue::Text(a), RuleValue::Text(b)) => a == b,
            (RuleValue::List(a), RuleValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(left, right)| left.strict_eq(right))
            }
            _ => false,
        }
    }

    /// Native ordering for numbers and text; mixed or unordered types have none.
    pub fn ordering(&self, other: &RuleValue) -> Option<Ordering> {
        match (self, other) {
            (RuleValue::Number(a), RuleValue::Number(b)) => a.partial_cmp(b),
            (RuleValue::Text(a), RuleValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn contains(&self, item: &RuleValue) -> bool {
        match self {
            RuleValue::List(items) => items.iter().any(|candidate| candidate.strict_eq(item)),
            _ => false,
        }
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        RuleValue::Bool(value)
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Null => write!(f, "null"),
            RuleValue::Bool(flag) => write!(f, "{flag}"),
            RuleValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{}", *number as i64)
            }
            RuleValue::Number(number) => write!(f, "{number}"),
            RuleValue::Text(text) => write!(f, "{text}"),
            RuleValue::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

fn number_to_json(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        return Value::Number(Number::from(number as i64));
    }
    Number::from_f64(number)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
