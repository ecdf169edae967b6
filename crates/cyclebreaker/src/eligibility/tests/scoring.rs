use serde_json::json;

use super::common::*;
use crate::domain::{OpportunityCategory, PreferredCategory};
use crate::eligibility::{assess, match_opportunities, score};

#[test]
fn ineligible_opportunities_score_zero() {
    let opportunity = opportunity(OpportunityCategory::Job, Vec::new());
    assert_eq!(score(&opportunity, &job_seeker(), false), 0.0);
}

#[test]
fn base_score_applies_without_any_bonus() {
    let opportunity = opportunity(OpportunityCategory::Service, Vec::new());
    assert!((score(&opportunity, &empty_profile(), true) - 0.5).abs() < 1e-9);
}

#[test]
fn freshness_contributes_a_fifth_of_its_value() {
    let mut opportunity = opportunity(OpportunityCategory::Service, Vec::new());
    opportunity.provenance.freshness_score = Some(0.5);
    assert!((score(&opportunity, &empty_profile(), true) - 0.6).abs() < 1e-9);
}

#[test]
fn goal_preference_and_walkability_stack_within_bounds() {
    let mut opportunity = opportunity(OpportunityCategory::Job, Vec::new());
    opportunity.provenance.freshness_score = Some(1.0);

    // 0.5 + 0.2 + 0.2 + 0.1 + 0.1 clamps to one.
    assert_eq!(score(&opportunity, &job_seeker(), true), 1.0);
}

#[test]
fn walk_bonus_requires_the_province_in_regions() {
    let mut opportunity = opportunity(OpportunityCategory::Job, Vec::new());
    opportunity.regions = vec!["ZA".to_string(), "ZA-WC".to_string()];

    // goal + preferred only
    assert!((score(&opportunity, &job_seeker(), true) - 0.8).abs() < 1e-9);
}

#[test]
fn preferred_plural_category_maps_to_singular() {
    let mut profile = empty_profile();
    profile.goals = Some(crate::domain::Goals {
        primary_goal: None,
        preferred_categories: Some(vec![PreferredCategory::Grants]),
        language_prefs: None,
    });
    let grant = opportunity(OpportunityCategory::Grant, Vec::new());
    let training = opportunity(OpportunityCategory::Training, Vec::new());

    assert!((score(&grant, &profile, true) - 0.6).abs() < 1e-9);
    assert!((score(&training, &profile, true) - 0.5).abs() < 1e-9);
}

#[test]
fn eligible_job_for_aligned_seeker_scores_at_least_seventy_percent() {
    let opportunity = opportunity(
        OpportunityCategory::Job,
        vec![
            rule(json!({"eq": [{"var": "location.country_code"}, "ZA"]})),
            rule(json!({"in": [{"var": "location.province_code"}, ["GP", "WC"]]})),
            rule(json!({"lte": [{"var": "economic.income_bracket_numeric"}, 3000]})),
        ],
    );

    let result = assess(&opportunity, &job_seeker());

    assert!(result.match_score >= 0.7, "score was {}", result.match_score);
    assert_eq!(result.why.len(), 3);
    assert!(result.disqualifiers.is_none());
    assert_eq!(
        result.matched_profile_fields,
        vec![
            "location.country_code",
            "location.province_code",
            "economic.income_bracket_numeric",
        ]
    );
}

#[test]
fn any_failing_rule_disqualifies() {
    let opportunity = opportunity(
        OpportunityCategory::Job,
        vec![
            rule(json!({"eq": [{"var": "location.country_code"}, "ZA"]})),
            rule(json!({"eq": [{"var": "economic.employment_status"}, "student"]})),
        ],
    );

    let result = assess(&opportunity, &job_seeker());

    assert_eq!(result.match_score, 0.0);
    assert_eq!(result.why.len(), 1);
    assert_eq!(result.disqualifiers.as_ref().map(Vec::len), Some(1));
}

#[test]
fn results_are_ordered_by_descending_score() {
    let mut closed = opportunity(
        OpportunityCategory::Job,
        vec![rule(json!({"eq": [{"var": "location.country_code"}, "NA"]}))],
    );
    closed.id = "closed".to_string();
    let mut service = opportunity(OpportunityCategory::Service, Vec::new());
    service.id = "service".to_string();
    let mut job = opportunity(OpportunityCategory::Job, Vec::new());
    job.id = "job".to_string();

    let results = match_opportunities(&job_seeker(), &[closed, service, job]);
    let order: Vec<&str> = results
        .iter()
        .map(|result| result.opportunity.id.as_str())
        .collect();

    assert_eq!(order, vec!["job", "service", "closed"]);
    assert!(results
        .iter()
        .all(|result| (0.0..=1.0).contains(&result.match_score)));
}
