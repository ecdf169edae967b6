//! JSON-logic eligibility rules, their explanation trail, and opportunity scoring.
//!
//! `evaluate` and `explain` share the same comparison helpers so the boolean
//! reported alongside an explanation can never drift from the plain verdict.

mod evaluator;
mod explain;
mod fields;
mod rule;
mod scoring;
mod value;

#[cfg(test)]
mod tests;

pub use evaluator::evaluate;
pub use explain::{explain, MatchExplanation};
pub use fields::{FieldPath, ProfileField};
pub use rule::{Comparison, Operand, RuleNode};
pub use scoring::{assess, match_opportunities, score};
pub use value::RuleValue;
