use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LenderType {
    Mashonisa,
    MicroLender,
    RetailStoreCard,
    CreditCard,
    Payday,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePeriod {
    PerYear,
    PerMonth,
    PerWeek,
    FlatTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    Annual,
    Monthly,
    Weekly,
    /// Simple interest.
    #[serde(rename = "none")]
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Initiation,
    Service,
    Collection,
    Insurance,
    Rollover,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeFrequency {
    Once,
    Monthly,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(rename = "type")]
    pub fee_type: FeeType,
    pub amount: f64,
    pub frequency: FeeFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
}

/// National Credit Regulator credit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NcrCategory {
    Unsecured,
    ShortTermFirst,
    ShortTermSubsequent,
    Incidental,
    Mortgage,
    CreditFacility,
    Unknown,
}

impl NcrCategory {
    /// Statutory maximum annual rate, as a decimal.
    pub const fn cap(self) -> Option<f64> {
        match self {
            NcrCategory::Unsecured => Some(0.285),
            NcrCategory::ShortTermFirst => Some(0.60),
            NcrCategory::ShortTermSubsequent => Some(0.36),
            NcrCategory::Incidental => Some(0.24),
            NcrCategory::Mortgage => Some(0.195),
            NcrCategory::CreditFacility => Some(0.215),
            NcrCategory::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collateral {
    #[serde(default)]
    pub id_retained: bool,
    #[serde(default)]
    pub bank_card_retained: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// One loan or credit obligation. Rates are percentages, so `25.0` means 25%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender_name: Option<String>,
    #[serde(default)]
    pub lender_type: LenderType,
    pub principal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_period: Option<RatePeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compounding: Option<Compounding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fees: Vec<Fee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_repay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_schedule: Option<Vec<Payment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncr_category: Option<NcrCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncr_registered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<Collateral>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

const WEEKS_PER_MONTH: f64 = 4.333;
const MIN_PAYMENT_FLOOR_ZAR: f64 = 50.0;
const MIN_PAYMENT_SHARE: f64 = 0.02;

impl Debt {
    pub fn new(id: impl Into<String>, principal: f64) -> Self {
        Self {
            id: id.into(),
            lender_name: None,
            lender_type: LenderType::Other,
            principal,
            rate_value: None,
            rate_period: None,
            compounding: None,
            term_months: None,
            min_payment: None,
            fees: Vec::new(),
            total_repay: None,
            payment_schedule: None,
            ncr_category: None,
            ncr_registered: None,
            collateral: None,
            notes: None,
        }
    }

    pub fn rate_percent(&self) -> f64 {
        self.rate_value.unwrap_or(0.0)
    }

    pub fn compounds_weekly(&self) -> bool {
        self.compounding == Some(Compounding::Weekly) || self.rate_period == Some(RatePeriod::PerWeek)
    }

    /// Payment schedule amounts, if a non-empty schedule was disclosed.
    pub fn scheduled_payments(&self) -> Option<Vec<f64>> {
        self.payment_schedule
            .as_deref()
            .filter(|schedule| !schedule.is_empty())
            .map(|schedule| schedule.iter().map(|payment| payment.amount).collect())
    }

    /// Nominal monthly rate implied by the quoted rate, period and compounding.
    pub fn monthly_rate(&self) -> f64 {
        let rate = self.rate_percent() / 100.0;
        match (self.rate_period, self.compounding) {
            (Some(RatePeriod::PerMonth), _) => rate,
            (Some(RatePeriod::PerWeek), _) => (1.0 + rate).powf(52.0 / 12.0) - 1.0,
            (_, Some(Compounding::Monthly)) => (1.0 + rate).powf(1.0 / 12.0) - 1.0,
            _ => rate / 12.0,
        }
    }

    /// Recurring fees expressed per month.
    pub fn monthly_fees_zar(&self) -> f64 {
        self.fees
            .iter()
            .map(|fee| match fee.frequency {
                FeeFrequency::Monthly => fee.amount,
                FeeFrequency::Weekly => fee.amount * WEEKS_PER_MONTH,
                FeeFrequency::Once => 0.0,
            })
            .sum()
    }

    pub fn one_time_fees_zar(&self) -> f64 {
        self.fees
            .iter()
            .filter(|fee| fee.frequency == FeeFrequency::Once)
            .map(|fee| fee.amount)
            .sum()
    }

    pub fn minimum_payment(&self) -> f64 {
        self.min_payment.unwrap_or_else(|| {
            (self.principal * MIN_PAYMENT_SHARE)
                .round()
                .max(MIN_PAYMENT_FLOOR_ZAR)
        })
    }

    pub fn retains_id_or_card(&self) -> bool {
        self.collateral
            .as_ref()
            .is_some_and(|collateral| collateral.id_retained || collateral.bank_card_retained)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    #[default]
    Avalanche,
    AvalancheSmallWinWeighted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPreferences {
    #[serde(default)]
    pub strategy: PayoffStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_win_weight: Option<f64>,
}

impl DebtPreferences {
    const WEIGHTED_STRATEGY_DEFAULT: f64 = 0.3;

    /// Weight given to paying small balances first. An explicit weight wins;
    /// otherwise the weighted strategy uses 0.3 and plain avalanche uses none.
    pub fn small_win_weight(&self) -> f64 {
        match (self.small_win_weight, self.strategy) {
            (Some(weight), _) => weight,
            (None, PayoffStrategy::AvalancheSmallWinWeighted) => Self::WEIGHTED_STRATEGY_DEFAULT,
            (None, PayoffStrategy::Avalanche) => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAnalyzeRequest {
    pub debts: Vec<Debt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<DebtPreferences>,
}

impl DebtAnalyzeRequest {
    pub fn new(debts: Vec<Debt>) -> Self {
        Self {
            debts,
            monthly_budget: None,
            preferences: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AprMethod {
    WeeklyCompounding,
    FlatTotalIrr,
    Amortizing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AprComputation {
    pub apr: f64,
    pub method: AprMethod,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardSeverity {
    Info,
    Warning,
    Critical,
}

impl HazardSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            HazardSeverity::Info => "info",
            HazardSeverity::Warning => "warning",
            HazardSeverity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardAction {
    Educate,
    Alert,
    Refer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardFlag {
    WeeklyCompounding,
    RolloverFees,
    InsuranceBundled,
    AdvanceFees,
    IdOrCardRetention,
    UnknownNcrRegistration,
    ExceedsNcrCap,
    MissingDisclosure,
    BalloonPayment,
}

impl HazardFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            HazardFlag::WeeklyCompounding => "weekly_compounding",
            HazardFlag::RolloverFees => "rollover_fees",
            HazardFlag::InsuranceBundled => "insurance_bundled",
            HazardFlag::AdvanceFees => "advance_fees",
            HazardFlag::IdOrCardRetention => "id_or_card_retention",
            HazardFlag::UnknownNcrRegistration => "unknown_ncr_registration",
            HazardFlag::ExceedsNcrCap => "exceeds_ncr_cap",
            HazardFlag::MissingDisclosure => "missing_disclosure",
            HazardFlag::BalloonPayment => "balloon_payment",
        }
    }
}

/// Risk signal detected on a single debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderHazard {
    pub flag: HazardFlag,
    pub severity: HazardSeverity,
    pub action: HazardAction,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_on_apr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtHazards {
    pub debt_id: String,
    pub hazards: Vec<LenderHazard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedDebt {
    pub debt_id: String,
    #[serde(rename = "effectiveAPR")]
    pub effective_apr: f64,
    pub min_payment: f64,
    pub extra_payment_applied: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub debt_id: String,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySchedule {
    pub month_index: u32,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPlan {
    pub ordered_debts: Vec<OrderedDebt>,
    pub monthly_schedule: Vec<MonthlySchedule>,
    pub months_to_freedom: u32,
    pub projected_interest_paid: f64,
    pub interest_saved_vs_min_only: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub id: String,
    pub title: String,
    pub lines: Vec<String>,
}

/// Referral organisation offered when a debt portfolio looks dangerous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResource {
    pub org: String,
    pub service: String,
    pub contact: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAnalyzeResponse {
    pub plan: DebtPlan,
    pub explanations: Vec<String>,
    pub hazards: Vec<DebtHazards>,
    pub summary_cards: Vec<SummaryCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_resources: Option<Vec<SupportResource>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrearsState {
    #[default]
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "7_30_days")]
    UpTo30Days,
    #[serde(rename = "31_90_days")]
    From31To90Days,
    #[serde(rename = "90_plus")]
    Over90Days,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationGoal {
    ReduceInterest,
    #[default]
    PaymentPlan,
    FeeWaiver,
    Dispute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Formal,
    Direct,
    #[default]
    Polite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationTemplateRequest {
    #[serde(default)]
    pub lender_type: LenderType,
    #[serde(default)]
    pub arrears_state: ArrearsState,
    #[serde(default)]
    pub goal: NegotiationGoal,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    Whatsapp,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationTemplate {
    pub channel: Channel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationTemplateResponse {
    pub templates: Vec<NegotiationTemplate>,
}
