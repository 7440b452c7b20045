//! Allocation command implementation.
//!
//! Groups positions by one dimension and shows value, share and averages.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::Session;
use crate::output::print_view;
use bondscope_core::format::{format_duration, format_millions, format_percent, format_yield};
use bondscope_portfolio::allocation::{
    aggregate_with, tokenization_split, AllocationGroup, Dimension,
};
use bondscope_portfolio::config::WeightingMethod;

/// Arguments for the allocation command.
#[derive(Args, Debug)]
pub struct AllocationArgs {
    /// Grouping dimension
    #[arg(short, long, value_enum, default_value = "sector")]
    pub by: GroupBy,

    /// Weighting for group average yield and duration (overrides the configuration)
    #[arg(short, long, value_enum)]
    pub weighting: Option<Weighting>,
}

/// Grouping options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    /// Sector
    Sector,
    /// Credit rating
    Rating,
    /// Duration bucket
    Duration,
    /// Issuer
    Issuer,
    /// Tokenized vs traditional
    Tokenization,
}

/// Average weighting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Weighting {
    /// Plain mean of member bonds
    Equal,
    /// Mean weighted by market value
    MarketValue,
}

impl From<Weighting> for WeightingMethod {
    fn from(weighting: Weighting) -> Self {
        match weighting {
            Weighting::Equal => WeightingMethod::EqualWeight,
            Weighting::MarketValue => WeightingMethod::MarketValue,
        }
    }
}

/// One allocation group for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AllocationRow {
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Share")]
    pub share: String,
    #[tabled(rename = "Positions")]
    pub count: usize,
    #[tabled(rename = "Avg Yield")]
    pub avg_yield: String,
    #[tabled(rename = "Avg Duration")]
    pub avg_duration: String,
    #[tabled(rename = "Color")]
    pub color: String,
}

impl From<&AllocationGroup> for AllocationRow {
    fn from(group: &AllocationGroup) -> Self {
        Self {
            group: group.key.clone(),
            value: format_millions(group.value),
            share: format_percent(group.percentage, 1),
            count: group.count,
            avg_yield: format_yield(group.avg_yield),
            avg_duration: format_duration(group.avg_duration, 1),
            color: group.color.to_string(),
        }
    }
}

/// Execute the allocation command.
pub fn execute(args: AllocationArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let session = Session::open(global)?;
    let mut config = session.config.aggregation.clone();
    if let Some(weighting) = args.weighting {
        config.weighting = weighting.into();
    }

    let portfolio = session.source.portfolio();
    let groups = match args.by {
        GroupBy::Sector => aggregate_with(portfolio, Dimension::Sector, &config),
        GroupBy::Rating => aggregate_with(portfolio, Dimension::Rating, &config),
        GroupBy::Duration => aggregate_with(portfolio, Dimension::DurationBucket, &config),
        GroupBy::Issuer => aggregate_with(portfolio, Dimension::Issuer, &config),
        GroupBy::Tokenization => tokenization_split(portfolio, &config),
    };

    let rows: Vec<AllocationRow> = groups.iter().map(AllocationRow::from).collect();
    print_view(&rows, &groups, format)
}
