use crate::debt::{Compounding, Debt, Payment, RatePeriod};

/// Bank personal loan quoted at a simple annual rate.
pub(super) fn personal_loan(id: &str, principal: f64, annual_percent: f64) -> Debt {
    Debt {
        rate_value: Some(annual_percent),
        rate_period: Some(RatePeriod::PerYear),
        compounding: Some(Compounding::Simple),
        term_months: Some(12),
        ncr_registered: Some(true),
        ..Debt::new(id, principal)
    }
}

/// Informal lender charging a weekly rate.
pub(super) fn weekly_loan(id: &str, principal: f64, weekly_percent: f64) -> Debt {
    Debt {
        rate_value: Some(weekly_percent),
        compounding: Some(Compounding::Weekly),
        ..Debt::new(id, principal)
    }
}

pub(super) fn flat_total(id: &str, principal: f64, payments: &[f64]) -> Debt {
    Debt {
        rate_period: Some(RatePeriod::FlatTotal),
        payment_schedule: Some(
            payments
                .iter()
                .map(|&amount| Payment { amount })
                .collect(),
        ),
        ncr_registered: Some(true),
        ..Debt::new(id, principal)
    }
}
