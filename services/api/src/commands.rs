use crate::infra::load_json;
use crate::report::{render_debt_report, render_ranking};
use clap::Args;
use cyclebreaker::config::AppConfig;
use cyclebreaker::debt::{analyze_debts, import_debts_path, DebtAnalyzeRequest};
use cyclebreaker::error::AppError;
use cyclebreaker::guard;
use cyclebreaker::matching::rank_jobs_for_candidate;
use cyclebreaker::router::RankRequest;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DebtAnalyzeArgs {
    /// JSON file holding a debt analysis request
    #[arg(long, required_unless_present = "csv", conflicts_with = "csv")]
    pub(crate) input: Option<PathBuf>,
    /// CSV export with one debt per row
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Monthly amount available for repayments (overrides the request)
    #[arg(long)]
    pub(crate) budget: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct JobsRankArgs {
    /// JSON file holding `{candidate, jobs, options?}`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Number of results to print
    #[arg(long)]
    pub(crate) top_k: Option<usize>,
}

pub(crate) fn load_debt_request(args: &DebtAnalyzeArgs) -> Result<DebtAnalyzeRequest, AppError> {
    let mut request = match (&args.input, &args.csv) {
        (Some(path), _) => load_json::<DebtAnalyzeRequest>(path)?,
        (None, Some(path)) => DebtAnalyzeRequest::new(import_debts_path(path)?),
        (None, None) => DebtAnalyzeRequest::new(Vec::new()),
    };

    if let Some(budget) = args.budget {
        request.monthly_budget = Some(budget);
    }

    guard::validate_debt_request(&request)?;
    Ok(request)
}

pub(crate) fn run_debt_analyze(args: DebtAnalyzeArgs) -> Result<(), AppError> {
    let request = load_debt_request(&args)?;
    let response = analyze_debts(&request);
    print!("{}", render_debt_report(&request, &response));
    Ok(())
}

pub(crate) fn run_jobs_rank(args: JobsRankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let RankRequest {
        candidate,
        jobs,
        mut options,
    } = load_json(&args.input)?;

    if let Some(top_k) = args.top_k {
        options.top_k = Some(top_k);
    }
    let options = config.matching.apply(options);
    guard::validate_ranking_request(&candidate, &jobs, &options)?;

    let results = rank_jobs_for_candidate(&candidate, &jobs, &options);
    print!("{}", render_ranking(&candidate, &results));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cyclebreaker-api-{}-{name}",
            std::process::id()
        ));
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
    }

    #[test]
    fn csv_request_takes_the_budget_flag() {
        let path = scratch_file(
            "debts.csv",
            "id,principal,rate_value,rate_period\nloan,1000,25,per_year\n",
        );
        let args = DebtAnalyzeArgs {
            input: None,
            csv: Some(path.clone()),
            budget: Some(200.0),
        };

        let request = load_debt_request(&args).expect("request loads");
        cleanup(&path);

        assert_eq!(request.debts.len(), 1);
        assert_eq!(request.monthly_budget, Some(200.0));
    }

    #[test]
    fn json_request_is_validated() {
        let path = scratch_file("empty.json", r#"{"debts": []}"#);
        let args = DebtAnalyzeArgs {
            input: Some(path.clone()),
            csv: None,
            budget: None,
        };

        let err = load_debt_request(&args).expect_err("no debts");
        cleanup(&path);

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let path = scratch_file("broken.json", "{\"debts\": [");
        let args = DebtAnalyzeArgs {
            input: Some(path.clone()),
            csv: None,
            budget: None,
        };

        let err = load_debt_request(&args).expect_err("broken json");
        cleanup(&path);

        assert!(matches!(err, AppError::Input(_)));
    }
}
