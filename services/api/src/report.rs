use cyclebreaker::debt::{DebtAnalyzeRequest, DebtAnalyzeResponse};
use cyclebreaker::matching::{Candidate, RankingResult};

/// Plain-text debt plan for the terminal.
pub(crate) fn render_debt_report(
    request: &DebtAnalyzeRequest,
    response: &DebtAnalyzeResponse,
) -> String {
    let plan = &response.plan;
    let mut lines = vec![format!("Debt payoff plan ({} debts)", request.debts.len())];
    if let Some(budget) = request.monthly_budget {
        lines.push(format!("Monthly budget: R{budget:.2}"));
    }

    lines.push("\nPayoff order".to_string());
    lines.extend(plan.ordered_debts.iter().enumerate().map(|(rank, debt)| {
        format!(
            "{}. {}: APR {:.1}%, minimum R{:.2}, extra paid R{:.2}",
            rank + 1,
            debt.debt_id,
            debt.effective_apr * 100.0,
            debt.min_payment,
            debt.extra_payment_applied
        )
    }));

    lines.push(format!(
        "\nMonths to freedom: {} | Projected interest R{:.2} | Saved vs minimums R{:.2}",
        plan.months_to_freedom, plan.projected_interest_paid, plan.interest_saved_vs_min_only
    ));

    if !response.explanations.is_empty() {
        lines.push("\nHow the APRs were computed".to_string());
        lines.extend(response.explanations.iter().map(|line| format!("- {line}")));
    }

    let flagged: Vec<String> = response
        .hazards
        .iter()
        .flat_map(|entry| {
            entry.hazards.iter().map(move |hazard| {
                format!(
                    "- [{}] {}: {}",
                    hazard.severity.as_str(),
                    entry.debt_id,
                    hazard.message
                )
            })
        })
        .collect();
    if flagged.is_empty() {
        lines.push("\nHazards: none".to_string());
    } else {
        lines.push("\nHazards".to_string());
        lines.extend(flagged);
    }

    if let Some(resources) = &response.support_resources {
        lines.push("\nFree help".to_string());
        lines.extend(resources.iter().map(|resource| {
            format!("- {} ({}): {}", resource.org, resource.service, resource.contact)
        }));
    }

    finish(lines)
}

/// Ranked job list for the terminal.
pub(crate) fn render_ranking(candidate: &Candidate, results: &[RankingResult]) -> String {
    let mut lines = vec![format!("Job ranking for {}", candidate.id)];

    if results.is_empty() {
        lines.push("No jobs to rank".to_string());
        return finish(lines);
    }

    for (rank, result) in results.iter().enumerate() {
        let title = result.job.title.as_deref().unwrap_or(&result.job.id);
        lines.push(format!("{}. {} (score {:.2})", rank + 1, title, result.total));
        lines.push(format!(
            "   skill {:.2} | transport {:.2} | pay {:.2} | preferences {:.2}",
            result.components.skill,
            result.components.transport,
            result.components.compensation,
            result.components.preferences
        ));
        match &result.transport {
            Some(quote) => lines.push(format!(
                "   commute: {} {:.1} km, {:.0} min, R{:.2}",
                quote.mode.as_str(),
                quote.distance_km,
                quote.duration_min,
                quote.cost_zar
            )),
            None if result.job.is_off_site() => {
                lines.push("   commute: none (remote or hybrid)".to_string());
            }
            None => {}
        }
        lines.extend(result.reasons.iter().flatten().map(|reason| format!("   - {reason}")));
    }

    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
