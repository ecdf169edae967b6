use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::domain::{
    AgeBracket, CommuteMode, Consent, Constraints, Demographics, Economic, EducationSkills,
    EmploymentStatus, ExtractionMethod, Goals, IncomeBracket, Location, Opportunity,
    OpportunityCategory, PreferredCategory, PrimaryGoal, Provenance, Province, UserProfile,
};
use crate::eligibility::RuleNode;

pub(super) fn consent() -> Consent {
    Consent {
        terms_accepted_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
        consent_data_processing: true,
        retention_days: Some(365),
        share_anonymized: None,
    }
}

pub(super) fn empty_profile() -> UserProfile {
    UserProfile::with_consent(consent())
}

/// Unemployed job seeker in Gauteng who walks to work.
pub(super) fn job_seeker() -> UserProfile {
    let mut profile = empty_profile();
    profile.location = Some(Location {
        country_code: "ZA".to_string(),
        province_code: Some(Province::Gauteng),
        municipality: Some("Johannesburg".to_string()),
        postal_code: None,
        geohash: None,
    });
    profile.demographics = Some(Demographics {
        age_bracket: Some(AgeBracket::From25To34),
        ..Demographics::default()
    });
    profile.economic = Some(Economic {
        employment_status: Some(EmploymentStatus::Unemployed),
        income_bracket: Some(IncomeBracket::Below1000),
        dependents_count: Some(2),
    });
    profile.education_skills = Some(EducationSkills {
        highest_education_level: None,
        skills: Some(vec!["welding".to_string(), "customer service".to_string()]),
        certifications: None,
    });
    profile.constraints = Some(Constraints {
        transport_mode: Some(CommuteMode::Walk),
        ..Constraints::default()
    });
    profile.goals = Some(Goals {
        primary_goal: Some(PrimaryGoal::FindJob),
        preferred_categories: Some(vec![PreferredCategory::Jobs]),
        language_prefs: Some(vec!["en".to_string(), "zu".to_string()]),
    });
    profile
}

pub(super) fn rule(raw: Value) -> RuleNode {
    RuleNode::from_json(&raw)
}

pub(super) fn opportunity(category: OpportunityCategory, rules: Vec<RuleNode>) -> Opportunity {
    Opportunity {
        id: "opp-001".to_string(),
        title: "Warehouse assistant".to_string(),
        category,
        organization: Some("Gauteng Logistics".to_string()),
        regions: vec!["ZA".to_string(), "ZA-GP".to_string()],
        value_amount: None,
        value_currency: None,
        deadline: None,
        required_documents: None,
        eligibility_rules: rules,
        source_url: "https://example.org/jobs/1".to_string(),
        apply_url: None,
        provenance: Provenance {
            extraction_method: ExtractionMethod::ManualCurated,
            evidence_links: None,
            last_seen_at: Utc
                .with_ymd_and_hms(2025, 5, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
            last_verified_at: None,
            freshness_score: None,
        },
    }
}
