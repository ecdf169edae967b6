use tracing::debug;

use super::domain::{
    Candidate, EligibilityCheck, Job, MatchComponentScores, MatchOptions, RankingResult,
    TransportQuote,
};
use super::transport::estimate_transport_quotes;

const DEFAULT_MAX_COMMUTE_MIN: f64 = 90.0;
const DEFAULT_COMMUTE_BUDGET_ZAR: f64 = 9999.0;
const NO_QUOTE_TRANSPORT_SCORE: f64 = 0.6;
const INELIGIBLE_PENALTY: f64 = 0.5;

/// Checks skill coverage and, for on-site roles, the chosen commute against
/// the candidate's limits. A failed check halves the ranking total rather
/// than excluding the job.
pub fn is_eligible(
    candidate: &Candidate,
    job: &Job,
    options: &MatchOptions,
    chosen: Option<&TransportQuote>,
) -> EligibilityCheck {
    let min_coverage = options.min_skill_coverage();
    let skill_coverage = skill_coverage(candidate, job);
    let mut reasons = Vec::new();

    if skill_coverage < min_coverage {
        reasons.push(format!(
            "Insufficient skill coverage ({:.0}% < {:.0}%)",
            skill_coverage * 100.0,
            min_coverage * 100.0
        ));
    }

    if let (false, Some(quote)) = (job.is_off_site(), chosen) {
        if let Some(max_min) = candidate.max_commute_min {
            if quote.duration_min > max_min {
                reasons.push(format!(
                    "Commute time too long ({:.0} min > {} min)",
                    quote.duration_min, max_min
                ));
            }
        }
        if let Some(budget) = candidate.commute_budget_zar {
            if !quote.within_budget {
                reasons.push(format!(
                    "Commute cost exceeds budget (R{:.2} > R{:.2})",
                    quote.cost_zar, budget
                ));
            }
        }
    }

    EligibilityCheck {
        ok: reasons.is_empty(),
        reasons,
        skill_coverage,
    }
}

/// Scores every job for `candidate`, best first, truncated to the option's `top_k`.
pub fn rank_jobs_for_candidate(
    candidate: &Candidate,
    jobs: &[Job],
    options: &MatchOptions,
) -> Vec<RankingResult> {
    let weights = options.weights();

    let mut results: Vec<RankingResult> = jobs
        .iter()
        .map(|job| {
            let chosen = if job.is_off_site() {
                None
            } else {
                estimate_transport_quotes(candidate, job, options.transport_params.as_ref())
                    .into_iter()
                    .next()
            };
            let eligibility = is_eligible(candidate, job, options, chosen.as_ref());

            let components = MatchComponentScores {
                skill: clamp01(eligibility.skill_coverage),
                transport: transport_score(candidate, chosen.as_ref()),
                compensation: compensation_score(candidate, job),
                preferences: preferences_score(candidate, job),
            };

            let mut total = components.weighted(&weights);
            if !eligibility.ok {
                total *= INELIGIBLE_PENALTY;
            }

            let reasons = options
                .explain
                .then(|| explain_ranking(job, chosen.as_ref(), &eligibility));

            RankingResult {
                job: job.clone(),
                total: clamp01(total),
                components,
                transport: chosen,
                reasons,
            }
        })
        .collect();

    results.sort_by(|a, b| b.total.total_cmp(&a.total));
    results.truncate(options.top_k());

    debug!(
        candidate = %candidate.id,
        jobs = jobs.len(),
        returned = results.len(),
        "ranked jobs"
    );
    results
}

fn skill_coverage(candidate: &Candidate, job: &Job) -> f64 {
    if job.skills_required.is_empty() {
        return 1.0;
    }

    let have: Vec<String> = candidate
        .skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();
    let matched = job
        .skills_required
        .iter()
        .filter(|required| have.contains(&required.to_lowercase()))
        .count();

    matched as f64 / job.skills_required.len() as f64
}

fn transport_score(candidate: &Candidate, quote: Option<&TransportQuote>) -> f64 {
    let Some(quote) = quote else {
        return NO_QUOTE_TRANSPORT_SCORE;
    };

    let max_min = candidate
        .max_commute_min
        .unwrap_or(DEFAULT_MAX_COMMUTE_MIN);
    let budget = candidate
        .commute_budget_zar
        .unwrap_or(DEFAULT_COMMUTE_BUDGET_ZAR);

    let time_part = headroom(quote.duration_min, max_min);
    let cost_part = headroom(quote.cost_zar, budget);
    0.5 * time_part + 0.5 * cost_part
}

/// Share of `limit` left after spending `used`. A zero limit leaves full
/// headroom only for a free (or instant) commute.
fn headroom(used: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return if used <= 0.0 { 1.0 } else { 0.0 };
    }
    clamp01(1.0 - used / limit)
}

fn compensation_score(candidate: &Candidate, job: &Job) -> f64 {
    // A zero amount means "not stated".
    let offer = job.salary_zar.filter(|amount| *amount != 0.0);
    let expected = candidate.expected_salary_zar.filter(|amount| *amount != 0.0);

    match (offer, expected) {
        (None, None) => 0.6,
        (Some(offer), None) => clamp01((1.0 + offer).log10() / 5.0),
        (None, Some(_)) => 0.4,
        (Some(offer), Some(expected)) if offer >= expected => {
            clamp01(0.6 + ((offer - expected) / expected.max(1000.0)).min(0.4))
        }
        (Some(offer), Some(expected)) => clamp01(offer / expected),
    }
}

fn preferences_score(candidate: &Candidate, job: &Job) -> f64 {
    let job_type = overlap(candidate.job_type_prefs.as_deref(), job.job_type.as_deref());
    let shift = overlap(candidate.shift_prefs.as_deref(), job.shift.as_deref());
    0.5 * job_type + 0.5 * shift
}

fn overlap(preferences: Option<&[String]>, value: Option<&str>) -> f64 {
    match (preferences, value) {
        (Some(preferences), Some(value)) if !preferences.is_empty() => {
            let value = value.to_lowercase();
            if preferences
                .iter()
                .any(|preference| preference.to_lowercase() == value)
            {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.5,
    }
}

fn explain_ranking(
    job: &Job,
    chosen: Option<&TransportQuote>,
    eligibility: &EligibilityCheck,
) -> Vec<String> {
    let transport = match chosen {
        Some(quote) => format!(
            "Transport({}) ~{:.0}min / R{:.2}",
            quote.mode.as_str(),
            quote.duration_min,
            quote.cost_zar
        ),
        None if job.remote => "Remote role".to_string(),
        None if job.hybrid => "Hybrid role".to_string(),
        None => "Transport N/A".to_string(),
    };

    let offer = match job.salary_zar.filter(|amount| *amount != 0.0) {
        Some(amount) => format!("Offer R{amount}"),
        None => "Offer TBD".to_string(),
    };

    let job_type = match &job.job_type {
        Some(kind) if !kind.is_empty() => format!("Type {kind}"),
        _ => "Type N/A".to_string(),
    };

    let mut reasons = vec![
        format!("Skill coverage {:.0}%", eligibility.skill_coverage * 100.0),
        transport,
        offer,
        job_type,
    ];
    reasons.extend(
        eligibility
            .reasons
            .iter()
            .map(|reason| format!("Note: {reason}")),
    );
    reasons
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
