use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::domain::{Collateral, Compounding, Debt, LenderType, NcrCategory, RatePeriod};

#[derive(Debug, Error)]
pub enum DebtImportError {
    #[error("failed to read debt spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid debt CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("debt spreadsheet contains no rows")]
    Empty,
}

/// Reads debts from a CSV file on disk.
pub fn import_debts_path<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, DebtImportError> {
    let file = std::fs::File::open(path)?;
    import_debts_csv(file)
}

/// Reads one debt per CSV row. Headers and cells are trimmed and blank cells
/// are treated as unset. Fees and payment schedules have no CSV columns.
pub fn import_debts_csv<R: Read>(reader: R) -> Result<Vec<Debt>, DebtImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut debts = Vec::new();
    for record in csv_reader.deserialize::<DebtRow>() {
        debts.push(record?.into_debt());
    }

    if debts.is_empty() {
        return Err(DebtImportError::Empty);
    }
    Ok(debts)
}

#[derive(Debug, Deserialize)]
struct DebtRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lender_name: Option<String>,
    #[serde(default)]
    lender_type: Option<LenderType>,
    principal: f64,
    #[serde(default)]
    rate_value: Option<f64>,
    #[serde(default)]
    rate_period: Option<RatePeriod>,
    #[serde(default)]
    compounding: Option<Compounding>,
    #[serde(default)]
    term_months: Option<u32>,
    #[serde(default)]
    min_payment: Option<f64>,
    #[serde(default)]
    total_repay: Option<f64>,
    #[serde(default)]
    ncr_category: Option<NcrCategory>,
    #[serde(default)]
    ncr_registered: Option<bool>,
    #[serde(default)]
    id_retained: Option<bool>,
    #[serde(default)]
    bank_card_retained: Option<bool>,
}

impl DebtRow {
    fn into_debt(self) -> Debt {
        let id_retained = self.id_retained.unwrap_or(false);
        let bank_card_retained = self.bank_card_retained.unwrap_or(false);
        let collateral = (id_retained || bank_card_retained).then(|| Collateral {
            id_retained,
            bank_card_retained,
            asset: None,
        });

        Debt {
            lender_name: self.lender_name,
            lender_type: self.lender_type.unwrap_or_default(),
            rate_value: self.rate_value,
            rate_period: self.rate_period,
            compounding: self.compounding,
            term_months: self.term_months,
            min_payment: self.min_payment,
            total_repay: self.total_repay,
            ncr_category: self.ncr_category,
            ncr_registered: self.ncr_registered,
            collateral,
            ..Debt::new(self.id, self.principal)
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
