//! Wagecast - salary explorer with cached AI estimates
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wagecast::cli::{commands, Cli, Commands};
use wagecast::config::ConfigManager;
use wagecast::error::WagecastResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            } else if e.is_retryable() {
                eprintln!("{} Nothing was cached, run the command again", style("Hint:").yellow());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> WagecastResult<()> {
    let cli = Cli::parse();

    // API keys may live in a .env file next to the dataset
    let dotenv = dotenvy::dotenv().ok();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }
    debug!("Using config {}", config_manager.path().display());

    wagecast::ui::init_theme();

    match cli.command {
        Commands::Init(args) => commands::init(args, &config_manager, &config).await,
        Commands::Predict(args) => commands::predict(args, &config).await,
        Commands::Options(args) => commands::options(args, &config).await,
        Commands::Data(args) => commands::data(args, &config).await,
        Commands::Ranges(args) => commands::ranges(args, &config).await,
        Commands::Contribute(args) => commands::contribute(args, &config).await,
        Commands::Cache(args) => commands::cache(args, &config).await,
        Commands::Config(args) => commands::config(args, &config_manager, &config).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("wagecast=warn"),
        1 => EnvFilter::new("wagecast=info"),
        _ => EnvFilter::new("wagecast=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
