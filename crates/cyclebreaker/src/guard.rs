//! Validation of inbound records before they reach the engines.
//!
//! The engines assume well-typed, finite input; everything a caller can get
//! wrong is rejected here with a message naming the offending record.

use std::collections::HashSet;

use crate::collaborators::PostingDetails;
use crate::debt::DebtAnalyzeRequest;
use crate::domain::Opportunity;
use crate::matching::{Candidate, GeoPoint, Job, MatchOptions, TransportParams};

/// Shortest free-text description accepted for profile suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("at least one debt is required")]
    NoDebts,
    #[error("debt '{0}' appears more than once")]
    DuplicateDebt(String),
    #[error("debt '{id}': {field} must be greater than zero")]
    NonPositive { id: String, field: &'static str },
    #[error("debt '{id}': {field} must be a finite, non-negative amount")]
    NegativeAmount { id: String, field: &'static str },
    #[error("monthlyBudget must be greater than zero")]
    InvalidBudget,
    #[error("smallWinWeight must be between 0 and 1")]
    InvalidSmallWinWeight,
    #[error("{record} '{id}' has an invalid location ({lat}, {lon})")]
    InvalidLocation {
        record: &'static str,
        id: String,
        lat: f64,
        lon: f64,
    },
    #[error("{record} '{id}': {field} must be a finite, non-negative number")]
    InvalidMeasure {
        record: &'static str,
        id: String,
        field: &'static str,
    },
    #[error("transport override for {mode} needs a positive speed and non-negative costs")]
    InvalidTransportOverride { mode: &'static str },
    #[error("options.{0} is out of range")]
    InvalidOption(&'static str),
    #[error("maxCostZar must be a finite, non-negative amount")]
    InvalidFareCap,
    #[error("opportunity '{0}' has a freshness score outside 0..=1")]
    InvalidFreshness(String),
    #[error("description must be at least {} characters", MIN_SUGGESTION_CHARS)]
    DescriptionTooShort,
    #[error("a job posting needs a title or a description")]
    EmptyPosting,
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn optional_non_negative(value: Option<f64>) -> bool {
    value.map_or(true, non_negative)
}

fn valid_point(point: &GeoPoint) -> bool {
    point.lat.is_finite()
        && point.lon.is_finite()
        && (-90.0..=90.0).contains(&point.lat)
        && (-180.0..=180.0).contains(&point.lon)
}

/// Checks a debt analysis request: at least one debt, unique ids, positive
/// principals, non-negative amounts, a positive budget and a fractional
/// small-win weight.
pub fn validate_debt_request(request: &DebtAnalyzeRequest) -> Result<(), ValidationError> {
    if request.debts.is_empty() {
        return Err(ValidationError::NoDebts);
    }

    let mut seen = HashSet::new();
    for debt in &request.debts {
        if !seen.insert(debt.id.as_str()) {
            return Err(ValidationError::DuplicateDebt(debt.id.clone()));
        }

        if !(debt.principal.is_finite() && debt.principal > 0.0) {
            return Err(ValidationError::NonPositive {
                id: debt.id.clone(),
                field: "principal",
            });
        }

        let negative = |field: &'static str| ValidationError::NegativeAmount {
            id: debt.id.clone(),
            field,
        };
        if !optional_non_negative(debt.rate_value) {
            return Err(negative("rateValue"));
        }
        if !optional_non_negative(debt.min_payment) {
            return Err(negative("minPayment"));
        }
        if !optional_non_negative(debt.total_repay) {
            return Err(negative("totalRepay"));
        }
        if debt.fees.iter().any(|fee| !non_negative(fee.amount)) {
            return Err(negative("fees"));
        }
        if debt
            .payment_schedule
            .iter()
            .flatten()
            .any(|payment| !non_negative(payment.amount))
        {
            return Err(negative("paymentSchedule"));
        }
    }

    if let Some(budget) = request.monthly_budget {
        if !(budget.is_finite() && budget > 0.0) {
            return Err(ValidationError::InvalidBudget);
        }
    }

    if let Some(weight) = request
        .preferences
        .as_ref()
        .and_then(|preferences| preferences.small_win_weight)
    {
        if !(0.0..=1.0).contains(&weight) {
            return Err(ValidationError::InvalidSmallWinWeight);
        }
    }

    Ok(())
}

pub fn validate_candidate(candidate: &Candidate) -> Result<(), ValidationError> {
    if !valid_point(&candidate.location) {
        return Err(ValidationError::InvalidLocation {
            record: "candidate",
            id: candidate.id.clone(),
            lat: candidate.location.lat,
            lon: candidate.location.lon,
        });
    }

    let fields = [
        ("expectedSalaryZar", candidate.expected_salary_zar),
        ("maxCommuteMin", candidate.max_commute_min),
        ("commuteBudgetZar", candidate.commute_budget_zar),
    ];
    for (field, value) in fields {
        if !optional_non_negative(value) {
            return Err(ValidationError::InvalidMeasure {
                record: "candidate",
                id: candidate.id.clone(),
                field,
            });
        }
    }
    Ok(())
}

pub fn validate_job(job: &Job) -> Result<(), ValidationError> {
    if !valid_point(&job.location) {
        return Err(ValidationError::InvalidLocation {
            record: "job",
            id: job.id.clone(),
            lat: job.location.lat,
            lon: job.location.lon,
        });
    }

    let fields = [
        ("salaryZar", job.salary_zar),
        ("transportStipendZar", job.transport_stipend_zar),
    ];
    for (field, value) in fields {
        if !optional_non_negative(value) {
            return Err(ValidationError::InvalidMeasure {
                record: "job",
                id: job.id.clone(),
                field,
            });
        }
    }
    Ok(())
}

pub fn validate_transport_params(params: &TransportParams) -> Result<(), ValidationError> {
    for (mode, mode_params) in params.overrides() {
        let valid = mode_params.speed_kmh.is_finite()
            && mode_params.speed_kmh > 0.0
            && non_negative(mode_params.cost_per_km)
            && non_negative(mode_params.base_zar);
        if !valid {
            return Err(ValidationError::InvalidTransportOverride {
                mode: mode.as_str(),
            });
        }
    }
    Ok(())
}

pub fn validate_match_options(options: &MatchOptions) -> Result<(), ValidationError> {
    if options.top_k == Some(0) {
        return Err(ValidationError::InvalidOption("topK"));
    }
    if let Some(coverage) = options.min_skill_coverage {
        if !(0.0..=1.0).contains(&coverage) {
            return Err(ValidationError::InvalidOption("minSkillCoverage"));
        }
    }
    if let Some(weights) = options.weights {
        let all_valid = [
            weights.skill,
            weights.transport,
            weights.compensation,
            weights.preferences,
        ]
        .into_iter()
        .all(non_negative);
        if !all_valid {
            return Err(ValidationError::InvalidOption("weights"));
        }
    }
    if let Some(params) = &options.transport_params {
        validate_transport_params(params)?;
    }
    Ok(())
}

/// Checks everything a ranking call consumes.
pub fn validate_ranking_request(
    candidate: &Candidate,
    jobs: &[Job],
    options: &MatchOptions,
) -> Result<(), ValidationError> {
    validate_candidate(candidate)?;
    jobs.iter().try_for_each(validate_job)?;
    validate_match_options(options)
}

pub fn validate_origin(origin: &GeoPoint) -> Result<(), ValidationError> {
    validate_point("origin", origin)
}

/// Rejects a free-standing point (one not attached to a candidate or job).
pub fn validate_point(name: &'static str, point: &GeoPoint) -> Result<(), ValidationError> {
    if valid_point(point) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLocation {
            record: name,
            id: name.to_string(),
            lat: point.lat,
            lon: point.lon,
        })
    }
}

pub fn validate_fare_cap(max_cost_zar: Option<f64>) -> Result<(), ValidationError> {
    if optional_non_negative(max_cost_zar) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFareCap)
    }
}

pub fn validate_opportunities(opportunities: &[Opportunity]) -> Result<(), ValidationError> {
    for opportunity in opportunities {
        if let Some(freshness) = opportunity.provenance.freshness_score {
            if !(0.0..=1.0).contains(&freshness) {
                return Err(ValidationError::InvalidFreshness(opportunity.id.clone()));
            }
        }
    }
    Ok(())
}

/// Trims a free-text profile description and rejects ones too short to use.
pub fn validate_description(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(trimmed)
}

pub fn validate_posting(posting: &PostingDetails) -> Result<(), ValidationError> {
    if posting.title.trim().is_empty() && posting.description.trim().is_empty() {
        return Err(ValidationError::EmptyPosting);
    }
    Ok(())
}
