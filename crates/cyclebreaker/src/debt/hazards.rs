use super::domain::{
    Debt, FeeFrequency, FeeType, HazardAction, HazardFlag, HazardSeverity, LenderHazard, RatePeriod,
};

const ADVANCE_FEE_SHARE: f64 = 0.10;
const NCR_CAP_TOLERANCE: f64 = 1.001;
const BALLOON_FACTOR: f64 = 1.5;

/// Risk signals for one debt given its effective APR, in a fixed order.
pub fn detect_hazards(debt: &Debt, apr: f64) -> Vec<LenderHazard> {
    let mut hazards = Vec::new();

    if debt.compounds_weekly() {
        hazards.push(
            hazard(
                HazardFlag::WeeklyCompounding,
                HazardSeverity::Warning,
                HazardAction::Educate,
                "Weekly compounding is expensive vs. monthly/annual",
            )
            .with_impact((apr * 100.0).round()),
        );
    }

    if debt.fees.iter().any(|fee| fee.fee_type == FeeType::Rollover) {
        hazards.push(hazard(
            HazardFlag::RolloverFees,
            HazardSeverity::Warning,
            HazardAction::Alert,
            "Rollover fees increase total cost significantly",
        ));
    }

    if debt.fees.iter().any(|fee| fee.fee_type == FeeType::Insurance) {
        hazards.push(hazard(
            HazardFlag::InsuranceBundled,
            HazardSeverity::Info,
            HazardAction::Educate,
            "Insurance premiums may be optional; ask for opt-out",
        ));
    }

    let initiation: f64 = debt
        .fees
        .iter()
        .filter(|fee| fee.fee_type == FeeType::Initiation && fee.frequency == FeeFrequency::Once)
        .map(|fee| fee.amount)
        .sum();
    let initiation_share = initiation / debt.principal.max(1.0);
    if initiation_share > ADVANCE_FEE_SHARE {
        hazards.push(hazard(
            HazardFlag::AdvanceFees,
            HazardSeverity::Warning,
            HazardAction::Alert,
            format!(
                "High initiation fees (~{}% of principal)",
                (initiation_share * 100.0).round()
            ),
        ));
    }

    if debt.retains_id_or_card() {
        hazards.push(hazard(
            HazardFlag::IdOrCardRetention,
            HazardSeverity::Critical,
            HazardAction::Refer,
            "Lender keeping ID or bank card is unsafe; seek help",
        ));
    }

    if debt.ncr_registered != Some(true) {
        hazards.push(hazard(
            HazardFlag::UnknownNcrRegistration,
            HazardSeverity::Warning,
            HazardAction::Educate,
            "Lender registration not verified with NCR",
        ));
    }

    if let Some(cap) = debt.ncr_category.and_then(|category| category.cap()) {
        if apr > cap * NCR_CAP_TOLERANCE {
            hazards.push(hazard(
                HazardFlag::ExceedsNcrCap,
                HazardSeverity::Critical,
                HazardAction::Refer,
                format!(
                    "APR {:.1}% exceeds NCR cap {:.1}%",
                    apr * 100.0,
                    cap * 100.0
                ),
            ));
        }
    }

    let schedule = debt.scheduled_payments();
    if debt.rate_period == Some(RatePeriod::FlatTotal)
        && schedule.is_none()
        && debt.total_repay.is_none()
    {
        hazards.push(hazard(
            HazardFlag::MissingDisclosure,
            HazardSeverity::Warning,
            HazardAction::Educate,
            "Flat-total indicated but no schedule/total repay provided",
        ));
    }

    if let Some(message) = schedule.as_deref().and_then(balloon_message) {
        hazards.push(hazard(
            HazardFlag::BalloonPayment,
            HazardSeverity::Warning,
            HazardAction::Alert,
            message,
        ));
    }

    hazards
}

fn balloon_message(payments: &[f64]) -> Option<String> {
    let (&last, earlier) = payments.split_last()?;
    if earlier.is_empty() {
        return None;
    }

    let mean = earlier.iter().sum::<f64>() / earlier.len() as f64;
    (last > mean * BALLOON_FACTOR).then(|| {
        format!(
            "Final payment R{last:.2} is {:.0}% larger",
            100.0 * (last / mean.max(1.0) - 1.0)
        )
    })
}

fn hazard(
    flag: HazardFlag,
    severity: HazardSeverity,
    action: HazardAction,
    message: impl Into<String>,
) -> LenderHazard {
    LenderHazard {
        flag,
        severity,
        action,
        message: message.into(),
        impact_on_apr: None,
    }
}

impl LenderHazard {
    fn with_impact(mut self, impact: f64) -> Self {
        self.impact_on_apr = Some(impact);
        self
    }
}
