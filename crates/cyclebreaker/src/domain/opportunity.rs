use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{PreferredCategory, PrimaryGoal};
use crate::eligibility::RuleNode;

/// Listing for a job, grant, training course, or public service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub category: OpportunityCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Region codes such as `ZA`, `ZA-WC`, `ZA-WC-CPT`.
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<Vec<String>>,
    #[serde(default)]
    pub eligibility_rules: Vec<RuleNode>,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    pub provenance: Provenance,
}

impl Opportunity {
    pub fn freshness(&self) -> f64 {
        self.provenance.freshness_score.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityCategory {
    Job,
    Training,
    Grant,
    Service,
}

impl OpportunityCategory {
    /// Category a user pursuing `goal` is looking for.
    pub const fn for_goal(goal: PrimaryGoal) -> Self {
        match goal {
            PrimaryGoal::FindJob => OpportunityCategory::Job,
            PrimaryGoal::GetGrant => OpportunityCategory::Grant,
            PrimaryGoal::GetTraining => OpportunityCategory::Training,
            PrimaryGoal::ReduceCosts => OpportunityCategory::Service,
        }
    }

    pub fn preferred_by(self, preference: PreferredCategory) -> bool {
        matches!(
            (preference, self),
            (PreferredCategory::Jobs, OpportunityCategory::Job)
                | (PreferredCategory::Grants, OpportunityCategory::Grant)
                | (PreferredCategory::Training, OpportunityCategory::Training)
        )
    }
}

/// Where the listing came from and how recently it was confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub extraction_method: ExtractionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_links: Option<Vec<String>>,
    pub last_seen_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    ManualCurated,
    StaticHtml,
    Api,
}

/// Opportunity paired with its eligibility audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub opportunity: Opportunity,
    pub match_score: f64,
    pub why: Vec<String>,
    pub matched_profile_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualifiers: Option<Vec<String>>,
}
