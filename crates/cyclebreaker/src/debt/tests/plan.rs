use std::collections::HashMap;

use super::common::*;
use crate::debt::{
    analyze_debts, simulate_plan, Collateral, Debt, DebtAnalyzeRequest, DebtPreferences,
    HazardFlag, NcrCategory, PayoffStrategy, MAX_MONTHS,
};

fn aprs(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(id, apr)| (id.to_string(), *apr))
        .collect()
}

#[test]
fn single_loan_with_double_budget_clears_before_term() {
    let loan = Debt {
        min_payment: Some(100.0),
        ..personal_loan("loan", 1000.0, 25.0)
    };
    let request = DebtAnalyzeRequest {
        monthly_budget: Some(200.0),
        ..DebtAnalyzeRequest::new(vec![loan])
    };

    let plan = simulate_plan(&request, &aprs(&[("loan", 0.28)]));

    assert!(plan.months_to_freedom < 12);
    assert_eq!(plan.months_to_freedom, 6);
    assert!(plan.interest_saved_vs_min_only >= 0.0);
    assert!(plan.projected_interest_paid > 0.0);
    assert_eq!(plan.monthly_schedule.len(), 6);

    let first = &plan.monthly_schedule[0].items[0];
    assert!((first.payment - 200.0).abs() < 1e-9);
    assert!((first.interest - 1000.0 * 0.25 / 12.0).abs() < 1e-9);
    assert_eq!(
        plan.monthly_schedule.last().map(|month| month.items[0].remaining),
        Some(0.0)
    );
}

#[test]
fn avalanche_orders_by_descending_apr() {
    let request = DebtAnalyzeRequest::new(vec![
        personal_loan("cheap", 500.0, 10.0),
        personal_loan("dear", 5000.0, 30.0),
        personal_loan("middle", 2000.0, 20.0),
    ]);

    let plan = simulate_plan(
        &request,
        &aprs(&[("cheap", 0.10), ("dear", 0.34), ("middle", 0.22)]),
    );
    let order: Vec<&str> = plan
        .ordered_debts
        .iter()
        .map(|debt| debt.debt_id.as_str())
        .collect();

    assert_eq!(order, vec!["dear", "middle", "cheap"]);
}

#[test]
fn small_win_weight_can_promote_a_small_balance() {
    let debts = vec![
        personal_loan("large", 5000.0, 30.0),
        personal_loan("small", 500.0, 25.0),
    ];
    let rates = aprs(&[("large", 0.30), ("small", 0.25)]);
    let order = |preferences: DebtPreferences| {
        let request = DebtAnalyzeRequest {
            preferences: Some(preferences),
            ..DebtAnalyzeRequest::new(debts.clone())
        };
        simulate_plan(&request, &rates)
            .ordered_debts
            .into_iter()
            .map(|debt| debt.debt_id)
            .collect::<Vec<_>>()
    };

    let weighted_default = DebtPreferences {
        strategy: PayoffStrategy::AvalancheSmallWinWeighted,
        small_win_weight: None,
    };
    let heavy = DebtPreferences {
        strategy: PayoffStrategy::AvalancheSmallWinWeighted,
        small_win_weight: Some(0.6),
    };

    assert_eq!(order(weighted_default), vec!["large", "small"]);
    assert_eq!(order(heavy), vec!["small", "large"]);
}

#[test]
fn equal_balances_fall_back_to_apr() {
    let request = DebtAnalyzeRequest {
        preferences: Some(DebtPreferences {
            strategy: PayoffStrategy::AvalancheSmallWinWeighted,
            small_win_weight: Some(1.0),
        }),
        ..DebtAnalyzeRequest::new(vec![
            personal_loan("a", 1000.0, 10.0),
            personal_loan("b", 1000.0, 20.0),
        ])
    };

    let plan = simulate_plan(&request, &aprs(&[("a", 0.10), ("b", 0.20)]));

    assert_eq!(plan.ordered_debts[0].debt_id, "b");
}

#[test]
fn surplus_goes_to_the_top_priority_debt() {
    let request = DebtAnalyzeRequest {
        monthly_budget: Some(400.0),
        ..DebtAnalyzeRequest::new(vec![
            Debt {
                min_payment: Some(100.0),
                ..personal_loan("low", 2000.0, 10.0)
            },
            Debt {
                min_payment: Some(100.0),
                ..personal_loan("high", 2000.0, 30.0)
            },
        ])
    };

    let plan = simulate_plan(&request, &aprs(&[("low", 0.10), ("high", 0.34)]));

    let first_month = &plan.monthly_schedule[0].items;
    let high = first_month
        .iter()
        .find(|item| item.debt_id == "high")
        .expect("high item");
    let low = first_month
        .iter()
        .find(|item| item.debt_id == "low")
        .expect("low item");
    assert!((high.payment - 300.0).abs() < 1e-9);
    assert!((low.payment - 100.0).abs() < 1e-9);
    assert!(plan.ordered_debts[0].extra_payment_applied > 0.0);
    assert_eq!(plan.ordered_debts[0].debt_id, "high");
}

#[test]
fn default_minimum_payment_and_budget() {
    let request = DebtAnalyzeRequest::new(vec![
        personal_loan("small", 1000.0, 10.0),
        personal_loan("large", 10_000.0, 10.0),
    ]);

    let plan = simulate_plan(&request, &HashMap::new());
    let minimum = |id: &str| {
        plan.ordered_debts
            .iter()
            .find(|debt| debt.debt_id == id)
            .map(|debt| debt.min_payment)
    };

    assert_eq!(minimum("small"), Some(50.0));
    assert_eq!(minimum("large"), Some(200.0));
    let first_month: f64 = plan.monthly_schedule[0]
        .items
        .iter()
        .map(|item| item.payment)
        .sum();
    assert!((first_month - 250.0).abs() < 1e-9);
}

#[test]
fn amortizing_debts_finish_within_their_term() {
    let request = DebtAnalyzeRequest::new(vec![
        Debt {
            min_payment: Some(120.0),
            ..personal_loan("a", 1200.0, 12.0)
        },
        Debt {
            min_payment: Some(60.0),
            term_months: Some(18),
            ..personal_loan("b", 900.0, 18.0)
        },
    ]);

    let plan = simulate_plan(&request, &aprs(&[("a", 0.13), ("b", 0.2)]));

    assert!(plan.months_to_freedom <= 18, "took {}", plan.months_to_freedom);
}

#[test]
fn unpayable_debt_stops_at_the_month_cap() {
    let request = DebtAnalyzeRequest::new(vec![Debt {
        min_payment: Some(10.0),
        ..personal_loan("trap", 10_000.0, 60.0)
    }]);

    let plan = simulate_plan(&request, &aprs(&[("trap", 0.8)]));

    assert_eq!(plan.months_to_freedom, MAX_MONTHS);
    assert_eq!(plan.monthly_schedule.len(), MAX_MONTHS as usize);
    assert_eq!(plan.interest_saved_vs_min_only, 0.0);
}

#[test]
fn analysis_prefixes_explanations_and_builds_cards() {
    let request = DebtAnalyzeRequest {
        monthly_budget: Some(200.0),
        ..DebtAnalyzeRequest::new(vec![
            Debt {
                min_payment: Some(100.0),
                ..personal_loan("loan", 1000.0, 25.0)
            },
            weekly_loan("mash", 500.0, 5.0),
        ])
    };

    let response = analyze_debts(&request);

    assert_eq!(response.explanations.len(), 2);
    assert!(response.explanations[0].starts_with("loan: Monthly rate"));
    assert!(response.explanations[1].starts_with("mash: Weekly rate"));
    assert_eq!(response.hazards.len(), 2);
    assert!(response.hazards[0].hazards.is_empty());

    let ids: Vec<&str> = response
        .summary_cards
        .iter()
        .map(|card| card.id.as_str())
        .collect();
    assert_eq!(ids, vec!["apr", "hazards", "timeline"]);
    assert_eq!(
        response.summary_cards[1].lines,
        vec![
            "weekly_compounding (warning)".to_string(),
            "unknown_ncr_registration (warning)".to_string(),
        ]
    );
    assert_eq!(response.plan.ordered_debts[0].debt_id, "mash");
    assert!(response.support_resources.is_none());
}

#[test]
fn two_critical_hazards_attach_support_resources() {
    let request = DebtAnalyzeRequest::new(vec![Debt {
        ncr_category: Some(NcrCategory::ShortTermFirst),
        collateral: Some(Collateral {
            bank_card_retained: true,
            ..Collateral::default()
        }),
        ..weekly_loan("mash", 1000.0, 10.0)
    }]);

    let response = analyze_debts(&request);

    let flags: Vec<HazardFlag> = response.hazards[0]
        .hazards
        .iter()
        .map(|hazard| hazard.flag)
        .collect();
    assert!(flags.contains(&HazardFlag::IdOrCardRetention));
    assert!(flags.contains(&HazardFlag::ExceedsNcrCap));

    let resources = response.support_resources.expect("support resources");
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].org, "Black Sash");
    assert_eq!(resources[0].toll_free, Some(true));
    assert_eq!(resources[1].org, "NCR");
}

#[test]
fn response_uses_camel_case_keys() {
    let response = analyze_debts(&DebtAnalyzeRequest::new(vec![weekly_loan("mash", 500.0, 5.0)]));
    let value = serde_json::to_value(&response).expect("serialize");

    assert!(value["plan"]["monthsToFreedom"].is_u64());
    assert!(value["plan"]["orderedDebts"][0]["effectiveAPR"].is_f64());
    assert!(value["summaryCards"].is_array());
    assert!(value["hazards"][0]["hazards"][0]["impact_on_apr"].is_f64());
    assert!(value.get("supportResources").is_none());
}
