//! WPOS Expenses binary entry point.
//!
//! Opens the configured database and prints expense items as JSON.
//! All logs go to stderr; stdout carries only command output.
//!
//! Coverage is excluded because the main function needs a real
//! environment and database file.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use wpos_expenses::cli::ExpenseCommands;
use wpos_expenses::config::Config;
use wpos_expenses::error::AppError;
use wpos_expenses::repository::ExpenseItemRepository;
use wpos_expenses::storage::SqliteStorage;

async fn run(args: &[String]) -> Result<String, AppError> {
    let command = ExpenseCommands::parse(args)?;
    if command == ExpenseCommands::Help {
        return Ok(wpos_expenses::cli::help_text().to_string());
    }

    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded: database={}, max_connections={}",
        config.database_path,
        config.max_connections
    );

    let storage = SqliteStorage::from_config(&config).await?;
    let repo = ExpenseItemRepository::new(storage);
    Ok(command.execute(&repo).await?)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // .env may set LOG_LEVEL, so load it before the subscriber
    dotenvy::dotenv().ok();

    // Initialize logging to stderr only (stdout is for command output)
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
