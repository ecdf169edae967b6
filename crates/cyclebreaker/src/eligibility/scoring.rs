use tracing::debug;

use crate::domain::{CommuteMode, MatchResult, Opportunity, OpportunityCategory, UserProfile};

use super::explain::{explain_into, MatchExplanation};

const BASE_SCORE: f64 = 0.5;
const FRESHNESS_WEIGHT: f64 = 0.2;
const GOAL_ALIGNMENT_BONUS: f64 = 0.2;
const PREFERRED_CATEGORY_BONUS: f64 = 0.1;
const WALKABLE_JOB_BONUS: f64 = 0.1;

/// Relevance of an opportunity to a profile in `[0, 1]`; ineligible pairs score zero.
pub fn score(opportunity: &Opportunity, profile: &UserProfile, is_eligible: bool) -> f64 {
    if !is_eligible {
        return 0.0;
    }

    let mut score = BASE_SCORE + opportunity.freshness() * FRESHNESS_WEIGHT;

    if profile
        .primary_goal()
        .map(OpportunityCategory::for_goal)
        .is_some_and(|category| category == opportunity.category)
    {
        score += GOAL_ALIGNMENT_BONUS;
    }

    if profile
        .preferred_categories()
        .iter()
        .any(|preference| opportunity.category.preferred_by(*preference))
    {
        score += PREFERRED_CATEGORY_BONUS;
    }

    if opportunity.category == OpportunityCategory::Job
        && profile.transport_mode() == Some(CommuteMode::Walk)
    {
        if let Some(province) = profile.province() {
            if opportunity
                .regions
                .iter()
                .any(|region| region.contains(province.label()))
            {
                score += WALKABLE_JOB_BONUS;
            }
        }
    }

    score.clamp(0.0, 1.0)
}

/// Explains every eligibility rule of `opportunity` and scores it. An
/// opportunity without rules is open to everyone.
pub fn assess(opportunity: &Opportunity, profile: &UserProfile) -> MatchResult {
    let mut explanation = MatchExplanation::default();
    let eligible = opportunity
        .eligibility_rules
        .iter()
        .map(|rule| explain_into(rule, profile, &mut explanation))
        .fold(true, |acc, passed| acc && passed);

    let match_score = score(opportunity, profile, eligible);
    debug!(
        opportunity = %opportunity.id,
        eligible,
        match_score,
        "assessed opportunity"
    );

    let MatchExplanation {
        matched_clauses,
        disqualifiers,
        matched_profile_fields,
    } = explanation;

    MatchResult {
        opportunity: opportunity.clone(),
        match_score,
        why: matched_clauses,
        matched_profile_fields,
        disqualifiers: if disqualifiers.is_empty() {
            None
        } else {
            Some(disqualifiers)
        },
    }
}

/// Assesses every opportunity and orders them by descending score. Ties keep input order.
pub fn match_opportunities(profile: &UserProfile, opportunities: &[Opportunity]) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = opportunities
        .iter()
        .map(|opportunity| assess(opportunity, profile))
        .collect();
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    results
}
