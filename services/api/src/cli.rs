use crate::commands::{run_debt_analyze, run_jobs_rank, DebtAnalyzeArgs, JobsRankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cyclebreaker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CycleBreaker",
    about = "Run the CycleBreaker decision engine as a service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze debts and print a payoff plan
    Debt {
        #[command(subcommand)]
        command: DebtCommand,
    },
    /// Rank jobs for a candidate
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DebtCommand {
    /// Compute APRs, hazards, and a payoff plan from a JSON request or CSV export
    Analyze(DebtAnalyzeArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Rank jobs for the candidate in a JSON request
    Rank(JobsRankArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Debt {
            command: DebtCommand::Analyze(args),
        } => run_debt_analyze(args),
        Command::Jobs {
            command: JobsCommand::Rank(args),
        } => run_jobs_rank(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["cyclebreaker-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn debt_analyze_accepts_csv_and_budget() {
        let cli = Cli::try_parse_from([
            "cyclebreaker-api",
            "debt",
            "analyze",
            "--csv",
            "debts.csv",
            "--budget",
            "1500",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Debt {
                command: DebtCommand::Analyze(args),
            }) => {
                assert_eq!(args.csv, Some(PathBuf::from("debts.csv")));
                assert_eq!(args.budget, Some(1500.0));
                assert!(args.input.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debt_analyze_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["cyclebreaker-api", "debt", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "cyclebreaker-api",
            "debt",
            "analyze",
            "--csv",
            "a.csv",
            "--input",
            "b.json",
        ])
        .is_err());
    }

    #[test]
    fn serve_overrides_host_and_port() {
        let cli = Cli::try_parse_from(["cyclebreaker-api", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
