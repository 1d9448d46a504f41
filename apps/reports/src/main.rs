//! # Tally Reports Entry Point
//!
//! Prints report envelopes for a Tally POS database as JSON.
//!
//! ## Usage
//! ```bash
//! # Every report, default database
//! tally-reports
//!
//! # Selected reports against a specific file
//! tally-reports --db ./tally_dev.db sale-count top-items-chart
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments, reject unknown report names (exit code 2)
//! 3. Resolve configuration (`--db`, `TALLY_DB_PATH`, data directory)
//! 4. Connect to database & run migrations
//! 5. Run each report and print its envelope

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use tally_core::ReportKind;
use tally_db::{migrations, Database};
use tally_reports_lib::{init_tracing, AppConfig, AppError, AppResult, ReportService};

/// Parsed command line.
enum Command {
    Help,
    Run {
        db_path: Option<PathBuf>,
        reports: Vec<ReportKind>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "tally-reports failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> AppResult<()> {
    let (db_path, reports) = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Run { db_path, reports } => (db_path, reports),
    };

    let config = AppConfig::from_env_with_path(db_path)?;
    info!(path = %config.database_path.display(), "Starting Tally reports");

    let db = Database::new(config.db_config()).await?;
    let (total, applied) = migrations::migration_status(db.pool()).await?;
    info!(total, applied, "Database ready");

    let service = ReportService::new(db);

    let mut output = serde_json::Map::new();
    for kind in reports {
        output.insert(kind.name().to_string(), service.run(kind).await?);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    service.database().close().await;
    Ok(())
}

/// Parses arguments; with no report names every report is selected.
fn parse_args(mut args: impl Iterator<Item = String>) -> AppResult<Command> {
    let mut db_path = None;
    let mut reports = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => match args.next() {
                Some(path) => db_path = Some(PathBuf::from(path)),
                None => return Err(AppError::config("--db requires a path")),
            },
            "--help" | "-h" => return Ok(Command::Help),
            name => reports.push(name.parse::<ReportKind>()?),
        }
    }

    if reports.is_empty() {
        reports = ReportKind::ALL.to_vec();
    }

    Ok(Command::Run { db_path, reports })
}

fn print_help() {
    println!("Tally POS Reports");
    println!();
    println!("Usage: tally-reports [OPTIONS] [REPORT]...");
    println!();
    println!("Reports (default: all):");
    for kind in ReportKind::ALL {
        println!("  {}", kind);
    }
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: $TALLY_DB_PATH or app data dir)");
    println!("  -h, --help         Show this help message");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::CoreError;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_defaults_to_all_reports() {
        match parse_args(args(&[])).unwrap() {
            Command::Run { db_path, reports } => {
                assert!(db_path.is_none());
                assert_eq!(reports, ReportKind::ALL.to_vec());
            }
            Command::Help => panic!("expected run"),
        }
    }

    #[test]
    fn test_db_and_selected_reports() {
        match parse_args(args(&["--db", "./shop.db", "sale-count", "top-items"])).unwrap() {
            Command::Run { db_path, reports } => {
                assert_eq!(db_path, Some(PathBuf::from("./shop.db")));
                assert_eq!(
                    reports,
                    vec![ReportKind::SaleCount, ReportKind::TopSaleItems]
                );
            }
            Command::Help => panic!("expected run"),
        }
    }

    #[test]
    fn test_unknown_report_exits_with_usage_code() {
        let err = parse_args(args(&["best-sellers"])).err().unwrap();
        assert!(matches!(
            err,
            AppError::Core(CoreError::UnknownReport { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_db_path() {
        let err = parse_args(args(&["--db"])).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_help() {
        assert!(matches!(
            parse_args(args(&["sale-count", "--help"])).unwrap(),
            Command::Help
        ));
    }
}
