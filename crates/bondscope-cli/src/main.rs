//! Bondscope CLI - portfolio analytics for a tokenized bond dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Allocation by sector, rating, duration bucket, issuer or tokenization
//! bondscope allocation --by rating
//!
//! # Duration risk per position, tier distribution or yield curve
//! bondscope risk --view distribution
//!
//! # Sector x rating heatmap
//! bondscope heatmap
//!
//! # Classify a single metric
//! bondscope classify duration 7.5
//!
//! # Compliance records and simulated actions
//! bondscope compliance holders
//! bondscope compliance freeze 0x742d35Cc6634C0532925a3b844Bc454e4438f44e
//!
//! # Load a dataset and configuration from disk
//! bondscope --data book.json --config bondscope.toml --format json summary
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Allocation(args) => commands::allocation::execute(args, &cli.global, format)?,
        Commands::Risk(args) => commands::risk::execute(args, &cli.global, format)?,
        Commands::Heatmap(args) => commands::heatmap::execute(args, &cli.global, format)?,
        Commands::Classify(args) => commands::classify::execute(args, &cli.global, format)?,
        Commands::Summary => commands::summary::execute(&cli.global, format)?,
        Commands::Compliance(args) => commands::compliance::execute(args, &cli.global, format)?,
        Commands::Config(args) => commands::config::execute(args, &cli.global, format)?,
    }

    Ok(())
}

/// Logs go to stderr so JSON and CSV output stay clean.
///
/// `RUST_LOG` wins unless `-v` was given.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,bondscope=info")),
        1 => EnvFilter::new("warn,bondscope=debug"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
