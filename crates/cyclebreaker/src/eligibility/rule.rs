use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::UserProfile;

use super::fields::FieldPath;
use super::value::RuleValue;

/// One node of a JSON-logic eligibility expression.
///
/// Well-formed nodes parse into a typed variant; anything else (unknown
/// operator, several keys in one object, operands of the wrong shape) is kept
/// verbatim as `Unrecognized` and always evaluates to `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleNode {
    Literal(RuleValue),
    All(Vec<RuleNode>),
    Any(Vec<RuleNode>),
    Not(Box<RuleNode>),
    Compare {
        op: Comparison,
        left: Operand,
        right: Operand,
    },
    /// `{"in": [item, collection]}`
    In {
        item: Operand,
        collection: Operand,
    },
    /// `{"contains": [collection, item]}`
    Contains {
        collection: Operand,
        item: Operand,
    },
    Exists(Operand),
    Missing(Operand),
    Var(FieldPath),
    Unrecognized(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    pub const fn operator(self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Ne => "ne",
            Comparison::Lt => "lt",
            Comparison::Lte => "lte",
            Comparison::Gt => "gt",
            Comparison::Gte => "gte",
        }
    }

    /// Same comparison with its operands swapped (`a < b` is `b > a`).
    pub const fn mirrored(self) -> Self {
        match self {
            Comparison::Lt => Comparison::Gt,
            Comparison::Lte => Comparison::Gte,
            Comparison::Gt => Comparison::Lt,
            Comparison::Gte => Comparison::Lte,
            other => other,
        }
    }

    fn from_operator(operator: &str) -> Option<Self> {
        match operator {
            "eq" => Some(Comparison::Eq),
            "ne" => Some(Comparison::Ne),
            "lt" => Some(Comparison::Lt),
            "lte" => Some(Comparison::Lte),
            "gt" => Some(Comparison::Gt),
            "gte" => Some(Comparison::Gte),
            _ => None,
        }
    }
}

/// Comparison operand: a profile lookup or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Var(FieldPath),
    Value(RuleValue),
}

impl Operand {
    pub fn var(path: &str) -> Self {
        Operand::Var(FieldPath::parse(path))
    }

    pub fn value(value: impl Into<RuleValue>) -> Self {
        Operand::Value(value.into())
    }

    pub fn field(&self) -> Option<&FieldPath> {
        match self {
            Operand::Var(path) => Some(path),
            Operand::Value(_) => None,
        }
    }

    /// Resolved value; `None` for absent profile data and for literal nulls.
    pub fn resolve(&self, profile: &UserProfile) -> Option<RuleValue> {
        match self {
            Operand::Var(path) => path.resolve(profile),
            Operand::Value(RuleValue::Null) => None,
            Operand::Value(value) => Some(value.clone()),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => match (map.len(), map.get("var")) {
                (1, Some(Value::String(path))) => Some(Operand::var(path)),
                _ => None,
            },
            other => RuleValue::from_json(other).map(Operand::Value),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Operand::Var(path) => single_key("var", Value::String(path.as_str().to_string())),
            Operand::Value(value) => value.to_json(),
        }
    }
}

impl RuleNode {
    pub fn all(rules: Vec<RuleNode>) -> Self {
        RuleNode::All(rules)
    }

    pub fn any(rules: Vec<RuleNode>) -> Self {
        RuleNode::Any(rules)
    }

    pub fn negate(rule: RuleNode) -> Self {
        RuleNode::Not(Box::new(rule))
    }

    pub fn compare(op: Comparison, left: Operand, right: Operand) -> Self {
        RuleNode::Compare { op, left, right }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => parse_object(map).unwrap_or_else(|| RuleNode::Unrecognized(value.clone())),
            other => RuleValue::from_json(other)
                .map(RuleNode::Literal)
                .unwrap_or_else(|| RuleNode::Unrecognized(other.clone())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            RuleNode::Literal(value) => value.to_json(),
            RuleNode::All(rules) => single_key("all", rules_to_json(rules)),
            RuleNode::Any(rules) => single_key("any", rules_to_json(rules)),
            RuleNode::Not(rule) => single_key("not", rule.to_json()),
            RuleNode::Compare { op, left, right } => {
                single_key(op.operator(), pair_to_json(left, right))
            }
            RuleNode::In { item, collection } => single_key("in", pair_to_json(item, collection)),
            RuleNode::Contains { collection, item } => {
                single_key("contains", pair_to_json(collection, item))
            }
            RuleNode::Exists(operand) => single_key("exists", operand.to_json()),
            RuleNode::Missing(operand) => single_key("missing", operand.to_json()),
            RuleNode::Var(path) => single_key("var", Value::String(path.as_str().to_string())),
            RuleNode::Unrecognized(raw) => raw.clone(),
        }
    }
}

fn parse_object(map: &Map<String, Value>) -> Option<RuleNode> {
    if map.len() != 1 {
        return None;
    }
    let (operator, operand) = map.iter().next()?;

    if let Some(op) = Comparison::from_operator(operator) {
        let (left, right) = operand_pair(operand)?;
        return Some(RuleNode::Compare { op, left, right });
    }

    match operator.as_str() {
        "all" => rule_list(operand).map(RuleNode::All),
        "any" => rule_list(operand).map(RuleNode::Any),
        "not" => {
            // JSON-logic allows the single operand to be wrapped in an array.
            let inner = match operand {
                Value::Array(items) if items.len() == 1 => &items[0],
                other => other,
            };
            Some(RuleNode::negate(RuleNode::from_json(inner)))
        }
        "in" => {
            let (item, collection) = operand_pair(operand)?;
            Some(RuleNode::In { item, collection })
        }
        "contains" => {
            let (collection, item) = operand_pair(operand)?;
            Some(RuleNode::Contains { collection, item })
        }
        "exists" => Operand::from_json(operand).map(RuleNode::Exists),
        "missing" => Operand::from_json(operand).map(RuleNode::Missing),
        "var" => match operand {
            Value::String(path) => Some(RuleNode::Var(FieldPath::parse(path))),
            _ => None,
        },
        _ => None,
    }
}

fn rule_list(operand: &Value) -> Option<Vec<RuleNode>> {
    match operand {
        Value::Array(items) => Some(items.iter().map(RuleNode::from_json).collect()),
        _ => None,
    }
}

fn operand_pair(operand: &Value) -> Option<(Operand, Operand)> {
    match operand {
        Value::Array(items) if items.len() == 2 => {
            Some((Operand::from_json(&items[0])?, Operand::from_json(&items[1])?))
        }
        _ => None,
    }
}

fn rules_to_json(rules: &[RuleNode]) -> Value {
    Value::Array(rules.iter().map(RuleNode::to_json).collect())
}

fn pair_to_json(first: &Operand, second: &Operand) -> Value {
    Value::Array(vec![first.to_json(), second.to_json()])
}

fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl Serialize for RuleNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RuleNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(RuleNode::from_json(&raw))
    }
}
