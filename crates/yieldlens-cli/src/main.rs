// crates/yieldlens-cli/src/main.rs
//
// CLI entrypoint for yieldlens.
//
// Loads configuration, initializes tracing, and dispatches to the project,
// period, and report subcommands. Every command works on local JSON
// snapshots; nothing is fetched over the network.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::period::PeriodCmd;
use commands::project::ProjectCmd;
use commands::report::ReportCmd;
use config::CliConfig;
use output::OutputFormat;

/// yieldlens: staking reward projections for NNS and SNS neurons.
#[derive(Parser, Debug)]
#[command(
    name = "yieldlens",
    version = "0.1.0",
    about = "Staking reward and APY projections for NNS and SNS neurons"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ~/.yieldlens/config.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    /// Output format. Overrides the config file.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Project rewards, staking power, and APY from an input snapshot.
    Project(ProjectCmd),

    /// Show the timestamp range of a reporting period.
    Period(PeriodCmd),

    /// List an account's transactions for a reporting period.
    Report(ReportCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing default config file is not worth a warning; a missing
    // explicit one is.
    let config_path = cli.config.clone().or_else(|| {
        CliConfig::default_path()
            .filter(|p| p.exists())
            .map(|p| p.to_string_lossy().to_string())
    });
    let (config, load_error) = match config_path.as_deref().map(CliConfig::load) {
        Some(Ok(cfg)) => (cfg, None),
        Some(Err(e)) => (CliConfig::default(), Some(e.to_string())),
        None => (CliConfig::default(), None),
    };

    // Initialize tracing subscriber for structured logging. RUST_LOG wins
    // over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match (&config_path, load_error) {
        (Some(path), Some(e)) => {
            tracing::warn!("Could not load config from {}: {}. Using defaults.", path, e)
        }
        (Some(path), None) => tracing::info!("Loaded configuration from {}", path),
        _ => {}
    }

    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output));

    match &cli.command {
        Commands::Project(cmd) => commands::project::run(cmd, format)?,
        Commands::Period(cmd) => commands::period::run(cmd, format)?,
        Commands::Report(cmd) => commands::report::run(cmd, &config.fetch_options(), format)?,
    }

    Ok(())
}
