use tracing::debug;

use super::domain::{AprComputation, AprMethod, Debt, RatePeriod};

const IRR_GUESS: f64 = 0.10;
const IRR_MAX_ITERATIONS: usize = 100;
const IRR_TOLERANCE: f64 = 1e-7;
const DEFAULT_TERM_MONTHS: u32 = 12;

/// Effective annual rate of a debt including compounding and fees.
///
/// Weekly-compounded debts are annualised directly. Flat-total loans with a
/// disclosed schedule or total are solved for their internal rate of return.
/// Everything else is treated as amortizing, with fees folded into the
/// monthly rate.
pub fn compute_effective_apr(debt: &Debt) -> AprComputation {
    if debt.compounds_weekly() {
        let weekly = debt.rate_percent() / 100.0;
        let apr = (1.0 + weekly).powi(52) - 1.0;
        return computation(
            debt,
            apr,
            AprMethod::WeeklyCompounding,
            format!(
                "Weekly rate {:.2}% → APR {:.1}%",
                debt.rate_percent(),
                apr * 100.0
            ),
        );
    }

    if debt.rate_period == Some(RatePeriod::FlatTotal) {
        if let Some(payments) = flat_total_payments(debt) {
            let mut cash_flows = Vec::with_capacity(payments.len() + 1);
            cash_flows.push(-debt.principal);
            cash_flows.extend(payments.iter().copied());

            let monthly = irr_monthly(&cash_flows);
            let apr = (1.0 + monthly).powi(12) - 1.0;
            return computation(
                debt,
                apr,
                AprMethod::FlatTotalIrr,
                format!(
                    "Flat-total IRR on {} payments → monthly {:.2}% → APR {:.1}%",
                    payments.len(),
                    monthly * 100.0,
                    apr * 100.0
                ),
            );
        }
    }

    let monthly = debt.monthly_rate();
    let term = f64::from(debt.term_months.unwrap_or(DEFAULT_TERM_MONTHS).max(1));
    let fee_uplift = debt.monthly_fees_zar() / debt.principal.max(1.0)
        + debt.one_time_fees_zar() / (debt.principal * term).max(1.0);
    let effective_monthly = (monthly + fee_uplift).max(0.0);
    let apr = (1.0 + effective_monthly).powi(12) - 1.0;

    computation(
        debt,
        apr,
        AprMethod::Amortizing,
        format!(
            "Monthly rate {:.2}% + fee uplift {:.2}% → APR {:.1}%",
            monthly * 100.0,
            fee_uplift * 100.0,
            apr * 100.0
        ),
    )
}

fn computation(debt: &Debt, apr: f64, method: AprMethod, note: String) -> AprComputation {
    debug!(debt = %debt.id, ?method, apr, "computed effective APR");
    AprComputation {
        apr,
        method,
        notes: vec![note],
    }
}

/// Disclosed schedule, or the total repayment split evenly over the term.
fn flat_total_payments(debt: &Debt) -> Option<Vec<f64>> {
    if let Some(payments) = debt.scheduled_payments() {
        return Some(payments);
    }

    match (debt.total_repay, debt.term_months) {
        (Some(total), Some(term)) if total > 0.0 && term > 0 => {
            let instalment = total / f64::from(term);
            Some(vec![instalment; term as usize])
        }
        _ => None,
    }
}

/// Monthly internal rate of return of `cash_flows` (index 0 is today) by
/// Newton-Raphson. A non-finite step stops the search at the last finite
/// estimate.
pub(crate) fn irr_monthly(cash_flows: &[f64]) -> f64 {
    let mut rate = IRR_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let (npv, derivative) = cash_flows.iter().enumerate().fold(
            (0.0, 0.0),
            |(npv, derivative), (period, flow)| {
                let t = period as f64;
                (
                    npv + flow / (1.0 + rate).powf(t),
                    derivative - t * flow / (1.0 + rate).powf(t + 1.0),
                )
            },
        );

        let next = rate - npv / derivative;
        if !next.is_finite() {
            debug!(rate, "IRR search aborted on a non-finite step");
            break;
        }
        if (next - rate).abs() < IRR_TOLERANCE {
            return next;
        }
        rate = next;
    }

    rate
}
