//! citydata-collector main entry point
//!
//! This is the command-line interface for the population collector.

use anyhow::Context;
use citydata_collector::config::{default_config, load_config_with_hash, Config};
use citydata_collector::schedule::run_collection;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// citydata-collector: real-time population snapshots from Seoul open data
///
/// Polls the city data API for every configured area, saves each round as a
/// timestamped CSV file, and repeats on every half-hour mark.
#[derive(Parser, Debug)]
#[command(name = "citydata-collector")]
#[command(version)]
#[command(about = "Collects real-time area population data every half hour", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single collection round and exit
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Validate config and show what would be collected without sending requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let max_ticks = cli.once.then_some(1);
    tracing::info!(
        "Collecting {} areas into {}",
        config.registry().len(),
        config.output.directory.display()
    );

    run_collection(&config, max_ticks)
        .await
        .context("Failed to start collector")?;

    Ok(())
}

/// Loads the config file if given, otherwise the built-in defaults
fn load(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            default_config().context("Invalid default configuration")
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("citydata_collector=info,warn"),
            1 => EnvFilter::new("citydata_collector=debug,info"),
            2 => EnvFilter::new("citydata_collector=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the endpoint, policies and areas
fn handle_dry_run(config: &Config) {
    println!("=== citydata-collector Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Service: {}", config.api.service);
    println!(
        "  Rows requested: {}..{}",
        config.api.start_index, config.api.end_index
    );
    println!("  Timeout: {}s", config.api.timeout_secs);

    println!("\nRetry:");
    println!(
        "  Per area: {} attempts, {}s apart",
        config.retry.area_max_attempts, config.retry.area_delay_secs
    );
    println!(
        "  Per round: {} reruns, {}s apart",
        config.retry.batch_max_retries, config.retry.batch_delay_secs
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());

    let registry = config.registry();
    println!("\nAreas ({}):", registry.len());
    for area in &registry {
        println!("  - {} ({})", area.name, area.code);
    }

    println!("\n✓ Configuration is valid");
}
