use std::io::Cursor;

use crate::debt::{
    import_debts_csv, Compounding, DebtImportError, LenderType, NcrCategory, RatePeriod,
};

const HEADER: &str = "id, lender_name, lender_type, principal, rate_value, rate_period, compounding, term_months, min_payment, total_repay, ncr_category, ncr_registered, id_retained, bank_card_retained\n";

#[test]
fn rows_become_debts_with_blank_cells_unset() {
    let csv = format!(
        "{HEADER}\
         card, Edgars , retail_store_card, 3500, 21, per_year, monthly, 24, 180, , credit_facility, true, , \n\
         mash, , mashonisa, 800, 30, flat_total, none, 1, , 1040, unknown, , true, false\n"
    );

    let debts = import_debts_csv(Cursor::new(csv)).expect("debts");

    assert_eq!(debts.len(), 2);

    let card = &debts[0];
    assert_eq!(card.id, "card");
    assert_eq!(card.lender_name.as_deref(), Some("Edgars"));
    assert_eq!(card.lender_type, LenderType::RetailStoreCard);
    assert_eq!(card.principal, 3500.0);
    assert_eq!(card.rate_period, Some(RatePeriod::PerYear));
    assert_eq!(card.compounding, Some(Compounding::Monthly));
    assert_eq!(card.term_months, Some(24));
    assert_eq!(card.min_payment, Some(180.0));
    assert_eq!(card.total_repay, None);
    assert_eq!(card.ncr_category, Some(NcrCategory::CreditFacility));
    assert_eq!(card.ncr_registered, Some(true));
    assert!(card.collateral.is_none());

    let mash = &debts[1];
    assert_eq!(mash.lender_name, None);
    assert_eq!(mash.compounding, Some(Compounding::Simple));
    assert_eq!(mash.total_repay, Some(1040.0));
    assert_eq!(mash.ncr_registered, None);
    assert!(mash.retains_id_or_card());
    assert!(mash.fees.is_empty());
}

#[test]
fn missing_lender_type_defaults_to_other() {
    let csv = "id,principal\nplain,1200\n";

    let debts = import_debts_csv(Cursor::new(csv)).expect("debts");

    assert_eq!(debts[0].lender_type, LenderType::Other);
    assert_eq!(debts[0].rate_value, None);
}

#[test]
fn unparseable_cells_are_reported() {
    let csv = format!("{HEADER}bad, , other, lots, , , , , , , , , , \n");

    let err = import_debts_csv(Cursor::new(csv)).expect_err("invalid principal");

    assert!(matches!(err, DebtImportError::Csv(_)));
    assert!(err.to_string().starts_with("invalid debt CSV data"));
}

#[test]
fn header_only_file_is_rejected() {
    let err = import_debts_csv(Cursor::new(HEADER)).expect_err("no rows");
    assert!(matches!(err, DebtImportError::Empty));
}
