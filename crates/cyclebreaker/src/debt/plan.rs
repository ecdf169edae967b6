use std::collections::HashMap;

use tracing::debug;

use super::domain::{
    Debt, DebtAnalyzeRequest, DebtPlan, MonthlySchedule, OrderedDebt, ScheduleItem,
};

/// Simulation horizon; a plan that has not finished by then reports this value.
pub const MAX_MONTHS: u32 = 360;
const SETTLED_BELOW_ZAR: f64 = 0.005;
const BASELINE_HORIZON_MONTHS: u32 = 12;

struct Account<'a> {
    debt: &'a Debt,
    apr: f64,
    remaining: f64,
    monthly_rate: f64,
    monthly_fee: f64,
    min_payment: f64,
    extra_applied: f64,
}

impl<'a> Account<'a> {
    fn open(debt: &'a Debt, apr: f64) -> Self {
        Self {
            debt,
            apr,
            remaining: debt.principal,
            monthly_rate: debt.monthly_rate(),
            monthly_fee: debt.monthly_fees_zar(),
            min_payment: debt.minimum_payment(),
            extra_applied: 0.0,
        }
    }

    fn owing(&self) -> bool {
        self.remaining > 0.0
    }

    fn repay(&mut self, amount: f64) {
        self.remaining = (self.remaining - amount).max(0.0);
        if self.remaining < SETTLED_BELOW_ZAR {
            self.remaining = 0.0;
        }
    }
}

/// Month-by-month payoff simulation under a fixed monthly budget.
///
/// Every owing debt receives its minimum payment; whatever is left of the
/// budget goes to the highest-priority debt still owing. Debts missing from
/// `apr_by_debt_id` are ranked as 0% APR.
pub fn simulate_plan(request: &DebtAnalyzeRequest, apr_by_debt_id: &HashMap<String, f64>) -> DebtPlan {
    let weight = request
        .preferences
        .map(|preferences| preferences.small_win_weight())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    let mut accounts: Vec<Account<'_>> = request
        .debts
        .iter()
        .map(|debt| Account::open(debt, apr_by_debt_id.get(&debt.id).copied().unwrap_or(0.0)))
        .collect();
    let order = payoff_order(&accounts, weight);
    accounts = reorder(accounts, &order);

    let budget = request
        .monthly_budget
        .unwrap_or_else(|| accounts.iter().map(|account| account.min_payment).sum());

    let mut schedule = Vec::new();
    let mut projected_interest = 0.0;
    let mut month = 0;

    while month < MAX_MONTHS && accounts.iter().any(Account::owing) {
        let mut surplus = budget;
        let mut items: Vec<(usize, ScheduleItem)> = Vec::new();

        for (index, account) in accounts.iter_mut().enumerate() {
            if !account.owing() {
                continue;
            }
            let interest = (account.remaining * account.monthly_rate + account.monthly_fee).max(0.0);
            let payment = account.min_payment.min(account.remaining + interest);
            let principal = (payment - interest).max(0.0);
            surplus -= payment;
            account.repay(principal);
            projected_interest += interest;

            items.push((
                index,
                ScheduleItem {
                    debt_id: account.debt.id.clone(),
                    payment,
                    interest,
                    principal,
                    remaining: account.remaining,
                },
            ));
        }

        if surplus > 0.0 {
            if let Some(target) = accounts.iter().position(Account::owing) {
                let account = &mut accounts[target];
                let extra = surplus.min(account.remaining);
                account.repay(extra);
                account.extra_applied += extra;

                if let Some((_, item)) = items.iter_mut().find(|(index, _)| *index == target) {
                    item.payment += extra;
                    item.principal += extra;
                    item.remaining = account.remaining;
                }
            }
        }

        schedule.push(MonthlySchedule {
            month_index: month,
            items: items.into_iter().map(|(_, item)| item).collect(),
        });
        month += 1;
    }

    if accounts.iter().any(Account::owing) {
        debug!(months = MAX_MONTHS, "payoff simulation reached the month cap");
    }

    let baseline_interest: f64 = accounts
        .iter()
        .map(|account| {
            let horizon = account
                .debt
                .term_months
                .unwrap_or(BASELINE_HORIZON_MONTHS)
                .min(BASELINE_HORIZON_MONTHS);
            account.debt.principal * account.monthly_rate * f64::from(horizon)
        })
        .sum();

    DebtPlan {
        ordered_debts: accounts
            .iter()
            .map(|account| OrderedDebt {
                debt_id: account.debt.id.clone(),
                effective_apr: account.apr,
                min_payment: account.min_payment,
                extra_payment_applied: account.extra_applied,
            })
            .collect(),
        monthly_schedule: schedule,
        months_to_freedom: month,
        projected_interest_paid: projected_interest,
        interest_saved_vs_min_only: (baseline_interest - projected_interest).max(0.0),
    }
}

/// Indices of `accounts` in payoff order.
///
/// APR (descending) and balance (ascending) are each turned into a
/// competition rank normalised to `[0, 1]`, then blended as
/// `(1 - weight) * apr_rank + weight * balance_rank`; the lowest blend is paid
/// first. Ties fall back to higher APR, then smaller balance, then input order.
fn payoff_order(accounts: &[Account<'_>], weight: f64) -> Vec<usize> {
    let denominator = accounts.len().saturating_sub(1).max(1) as f64;
    let priority = |account: &Account<'_>| {
        let apr_rank = accounts.iter().filter(|other| other.apr > account.apr).count() as f64;
        let balance_rank = accounts
            .iter()
            .filter(|other| other.debt.principal < account.debt.principal)
            .count() as f64;
        (1.0 - weight) * apr_rank / denominator + weight * balance_rank / denominator
    };

    let priorities: Vec<f64> = accounts.iter().map(priority).collect();
    let mut order: Vec<usize> = (0..accounts.len()).collect();
    order.sort_by(|&a, &b| {
        priorities[a]
            .total_cmp(&priorities[b])
            .then_with(|| accounts[b].apr.total_cmp(&accounts[a].apr))
            .then_with(|| accounts[a].debt.principal.total_cmp(&accounts[b].debt.principal))
    });
    order
}

fn reorder<'a>(accounts: Vec<Account<'a>>, order: &[usize]) -> Vec<Account<'a>> {
    let mut slots: Vec<Option<Account<'a>>> = accounts.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}
