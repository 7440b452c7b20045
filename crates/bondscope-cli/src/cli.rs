//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AllocationArgs, ClassifyArgs, ComplianceArgs, ConfigArgs, HeatmapArgs, RiskArgs,
};

/// Bondscope - tokenized bond portfolio analytics
#[derive(Parser)]
#[command(name = "bondscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug for bondscope crates, -vv everything)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where configuration and data come from.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, env = "BONDSCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// JSON dataset (defaults to `data.path` in the config, then the built-in demo)
    #[arg(short, long, env = "BONDSCOPE_DATA", global = true)]
    pub data: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show portfolio allocation grouped by one dimension
    Allocation(AllocationArgs),

    /// Show duration risk per position, per tier, or the yield curve
    Risk(RiskArgs),

    /// Show the sector x rating risk heatmap
    Heatmap(HeatmapArgs),

    /// Classify a single metric value into a risk tier
    Classify(ClassifyArgs),

    /// Show overview figures
    Summary,

    /// Inspect compliance records or simulate compliance actions
    Compliance(ComplianceArgs),

    /// Manage the dashboard configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
