use std::collections::HashMap;

use tracing::info;

use super::apr::compute_effective_apr;
use super::domain::{
    DebtAnalyzeRequest, DebtAnalyzeResponse, DebtHazards, HazardSeverity, SummaryCard,
    SupportResource,
};
use super::hazards::detect_hazards;
use super::plan::simulate_plan;

const SUPPORT_REFERRAL_CRITICAL_COUNT: usize = 2;
const SUMMARY_HAZARD_LINES: usize = 5;

/// Full debt analysis: APR and hazards per debt, a payoff plan, summary cards,
/// and referral resources when at least two critical hazards were found.
pub fn analyze_debts(request: &DebtAnalyzeRequest) -> DebtAnalyzeResponse {
    let mut apr_by_debt_id = HashMap::with_capacity(request.debts.len());
    let mut explanations = Vec::new();
    let mut hazards = Vec::with_capacity(request.debts.len());

    for debt in &request.debts {
        let computation = compute_effective_apr(debt);
        explanations.extend(
            computation
                .notes
                .iter()
                .map(|note| format!("{}: {note}", debt.id)),
        );
        hazards.push(DebtHazards {
            debt_id: debt.id.clone(),
            hazards: detect_hazards(debt, computation.apr),
        });
        apr_by_debt_id.insert(debt.id.clone(), computation.apr);
    }

    let plan = simulate_plan(request, &apr_by_debt_id);

    let critical = hazards
        .iter()
        .flat_map(|entry| &entry.hazards)
        .filter(|hazard| hazard.severity == HazardSeverity::Critical)
        .count();

    info!(
        debts = request.debts.len(),
        months_to_freedom = plan.months_to_freedom,
        critical_hazards = critical,
        "analyzed debts"
    );

    let average_apr = request
        .debts
        .iter()
        .filter_map(|debt| apr_by_debt_id.get(&debt.id))
        .sum::<f64>()
        / request.debts.len().max(1) as f64;
    let summary_cards = summary_cards(average_apr, &hazards, plan.months_to_freedom);

    DebtAnalyzeResponse {
        plan,
        explanations,
        hazards,
        summary_cards,
        support_resources: (critical >= SUPPORT_REFERRAL_CRITICAL_COUNT).then(support_resources),
    }
}

fn summary_cards(average_apr: f64, hazards: &[DebtHazards], months_to_freedom: u32) -> Vec<SummaryCard> {
    let hazard_lines = hazards
        .iter()
        .flat_map(|entry| &entry.hazards)
        .filter(|hazard| hazard.severity != HazardSeverity::Info)
        .take(SUMMARY_HAZARD_LINES)
        .map(|hazard| format!("{} ({})", hazard.flag.as_str(), hazard.severity.as_str()))
        .collect();

    vec![
        SummaryCard {
            id: "apr".to_string(),
            title: "Effective APRs".to_string(),
            lines: vec![
                format!("Average APR: {:.1}%", average_apr * 100.0),
                "Highest APR first saves interest".to_string(),
            ],
        },
        SummaryCard {
            id: "hazards".to_string(),
            title: "Hazards detected".to_string(),
            lines: hazard_lines,
        },
        SummaryCard {
            id: "timeline".to_string(),
            title: "Time to freedom".to_string(),
            lines: vec![format!("Estimated: {months_to_freedom} months")],
        },
    ]
}

/// Organisations offering free debt counselling and complaint handling.
pub fn support_resources() -> Vec<SupportResource> {
    vec![
        SupportResource {
            org: "Black Sash".to_string(),
            service: "Debt Counseling & Legal Aid".to_string(),
            contact: "0800 30 59 59".to_string(),
            url: "https://www.blacksash.org.za/".to_string(),
            toll_free: Some(true),
            languages: Some(
                ["en", "zu", "xh", "af"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        },
        SupportResource {
            org: "NCR".to_string(),
            service: "Debt Counselor Locator & Complaints".to_string(),
            contact: "https://www.ncr.org.za/consumers/debt-counselling/find-debt-counselor"
                .to_string(),
            url: "https://www.ncr.org.za/".to_string(),
            toll_free: None,
            languages: None,
        },
    ]
}
