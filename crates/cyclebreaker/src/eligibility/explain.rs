use serde::{Deserialize, Serialize};

use crate::domain::UserProfile;

use super::evaluator::{compare, member_of};
use super::fields::FieldPath;
use super::rule::{Comparison, Operand, RuleNode};
use super::value::RuleValue;

/// Audit trail describing which clauses passed or disqualified a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub matched_clauses: Vec<String>,
    pub disqualifiers: Vec<String>,
    pub matched_profile_fields: Vec<String>,
}

impl MatchExplanation {
    fn record(&mut self, field: &FieldPath, passed: bool, matched: String, disqualified: String) {
        self.matched_profile_fields.push(field.as_str().to_string());
        if passed {
            self.matched_clauses.push(matched);
        } else {
            self.disqualifiers.push(disqualified);
        }
    }
}

/// Evaluates `rule` while recording every clause that touches a profile field.
/// The returned boolean always equals [`super::evaluate`] for the same input.
pub fn explain(rule: &RuleNode, profile: &UserProfile) -> (bool, MatchExplanation) {
    let mut explanation = MatchExplanation::default();
    let passed = explain_into(rule, profile, &mut explanation);
    (passed, explanation)
}

pub(crate) fn explain_into(
    rule: &RuleNode,
    profile: &UserProfile,
    explanation: &mut MatchExplanation,
) -> bool {
    match rule {
        RuleNode::Literal(value) => value.truthy(),
        // Children are all visited so every failing clause is reported.
        RuleNode::All(rules) => rules
            .iter()
            .map(|rule| explain_into(rule, profile, explanation))
            .fold(true, |acc, passed| acc && passed),
        RuleNode::Any(rules) => rules
            .iter()
            .map(|rule| explain_into(rule, profile, explanation))
            .fold(false, |acc, passed| acc || passed),
        RuleNode::Not(rule) => !explain_into(rule, profile, explanation),
        RuleNode::Compare { op, left, right } => {
            explain_comparison(*op, left, right, profile, explanation)
        }
        RuleNode::In { item, collection } => {
            let item_value = item.resolve(profile);
            let passed = member_of(collection.resolve(profile).as_ref(), item_value.as_ref());
            if let Some(field) = item.field().or_else(|| collection.field()) {
                let label = field.label();
                explanation.record(
                    field,
                    passed,
                    format!("{label} is in accepted regions/categories"),
                    format!(
                        "{label} not in accepted list (current: {})",
                        display(item_value.as_ref())
                    ),
                );
            }
            passed
        }
        RuleNode::Contains { collection, item } => {
            let item_value = item.resolve(profile);
            let passed = member_of(collection.resolve(profile).as_ref(), item_value.as_ref());
            if let Some(field) = collection.field().or_else(|| item.field()) {
                let label = field.label();
                explanation.record(
                    field,
                    passed,
                    format!("{label} contains required skill/certification"),
                    format!(
                        "{label} missing required item: {}",
                        display(item_value.as_ref())
                    ),
                );
            }
            passed
        }
        RuleNode::Exists(operand) => {
            let passed = operand.resolve(profile).is_some();
            if let Some(field) = operand.field() {
                let label = field.label();
                explanation.record(
                    field,
                    passed,
                    format!("{label} is provided"),
                    format!("{label} is required but not provided"),
                );
            }
            passed
        }
        RuleNode::Missing(operand) => {
            let passed = operand.resolve(profile).is_none();
            if let Some(field) = operand.field() {
                let label = field.label();
                explanation.record(
                    field,
                    passed,
                    format!("{label} is not provided, as required"),
                    format!("{label} must not be provided"),
                );
            }
            passed
        }
        RuleNode::Var(path) => path
            .resolve(profile)
            .map(|value| value.truthy())
            .unwrap_or(false),
        RuleNode::Unrecognized(_) => false,
    }
}

fn explain_comparison(
    op: Comparison,
    left: &Operand,
    right: &Operand,
    profile: &UserProfile,
    explanation: &mut MatchExplanation,
) -> bool {
    let left_value = left.resolve(profile);
    let right_value = right.resolve(profile);
    let passed = compare(op, left_value.as_ref(), right_value.as_ref());

    // Phrase the clause from the field's point of view, mirroring the
    // operator when the profile lookup sits on the right-hand side.
    let (field, op, current, target) = match (left.field(), right.field()) {
        (Some(field), _) => (field, op, left_value.as_ref(), right_value.as_ref()),
        (None, Some(field)) => (field, op.mirrored(), right_value.as_ref(), left_value.as_ref()),
        (None, None) => return passed,
    };

    let label = field.label();
    let current = display(current);
    let target = display(target);
    let (matched, disqualified) = match op {
        Comparison::Eq => (
            format!("{label} matches requirement ({target})"),
            format!("{label} does not match (current: {current}, required: {target})"),
        ),
        Comparison::Ne => (
            format!("{label} is not {target}"),
            format!("{label} must not be {target} (current: {current})"),
        ),
        Comparison::Lt => (
            format!("{label} below limit (< {target})"),
            format!("{label} not below limit (current: {current}, limit: {target})"),
        ),
        Comparison::Lte => (
            format!("{label} within threshold (≤ {target})"),
            format!("{label} exceeds threshold (current: {current}, max: {target})"),
        ),
        Comparison::Gt => (
            format!("{label} above minimum (> {target})"),
            format!("{label} not above minimum (current: {current}, min: {target})"),
        ),
        Comparison::Gte => (
            format!("{label} meets minimum requirement (≥ {target})"),
            format!("{label} below minimum (current: {current}, min: {target})"),
        ),
    };

    explanation.record(field, passed, matched, disqualified);
    passed
}

fn display(value: Option<&RuleValue>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| "not provided".to_string())
}
