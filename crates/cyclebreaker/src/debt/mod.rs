//! Debt analysis: effective APR, lender hazards, payoff simulation, and
//! negotiation messages.

mod analysis;
mod apr;
mod domain;
mod hazards;
mod import;
mod negotiation;
mod plan;

#[cfg(test)]
mod tests;

pub use analysis::{analyze_debts, support_resources};
pub use apr::compute_effective_apr;
pub use domain::{
    AprComputation, AprMethod, ArrearsState, Channel, Collateral, Compounding, Debt,
    DebtAnalyzeRequest, DebtAnalyzeResponse, DebtHazards, DebtPlan, DebtPreferences, Fee,
    FeeFrequency, FeeType, HazardAction, HazardFlag, HazardSeverity, LenderHazard, LenderType,
    MonthlySchedule, NcrCategory, NegotiationGoal, NegotiationTemplate,
    NegotiationTemplateRequest, NegotiationTemplateResponse, OrderedDebt, Payment,
    PayoffStrategy, RatePeriod, ScheduleItem, SummaryCard, SupportResource, Tone,
};
pub use hazards::detect_hazards;
pub use import::{import_debts_csv, import_debts_path, DebtImportError};
pub use negotiation::negotiation_templates;
pub use plan::{simulate_plan, MAX_MONTHS};
