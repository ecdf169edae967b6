use std::cmp::Ordering;

use crate::domain::UserProfile;

use super::rule::{Comparison, RuleNode};
use super::value::RuleValue;

/// Evaluates a rule against a profile. Never panics; anything that cannot be
/// decided evaluates to `false`.
pub fn evaluate(rule: &RuleNode, profile: &UserProfile) -> bool {
    match rule {
        RuleNode::Literal(value) => value.truthy(),
        RuleNode::All(rules) => rules.iter().all(|rule| evaluate(rule, profile)),
        RuleNode::Any(rules) => rules.iter().any(|rule| evaluate(rule, profile)),
        RuleNode::Not(rule) => !evaluate(rule, profile),
        RuleNode::Compare { op, left, right } => compare(
            *op,
            left.resolve(profile).as_ref(),
            right.resolve(profile).as_ref(),
        ),
        RuleNode::In { item, collection } => member_of(
            collection.resolve(profile).as_ref(),
            item.resolve(profile).as_ref(),
        ),
        RuleNode::Contains { collection, item } => member_of(
            collection.resolve(profile).as_ref(),
            item.resolve(profile).as_ref(),
        ),
        RuleNode::Exists(operand) => operand.resolve(profile).is_some(),
        RuleNode::Missing(operand) => operand.resolve(profile).is_none(),
        RuleNode::Var(path) => path
            .resolve(profile)
            .map(|value| value.truthy())
            .unwrap_or(false),
        RuleNode::Unrecognized(_) => false,
    }
}

/// Compares two resolved values. An absent side fails every comparison, `ne` included.
pub(crate) fn compare(op: Comparison, left: Option<&RuleValue>, right: Option<&RuleValue>) -> bool {
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };

    match op {
        Comparison::Eq => left.strict_eq(right),
        Comparison::Ne => !left.strict_eq(right),
        Comparison::Lt => left.ordering(right) == Some(Ordering::Less),
        Comparison::Lte => matches!(
            left.ordering(right),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Comparison::Gt => left.ordering(right) == Some(Ordering::Greater),
        Comparison::Gte => matches!(
            left.ordering(right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

pub(crate) fn member_of(collection: Option<&RuleValue>, item: Option<&RuleValue>) -> bool {
    match (collection, item) {
        (Some(collection), Some(item)) => collection.contains(item),
        _ => false,
    }
}
