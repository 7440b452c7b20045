//! Risk command implementation.
//!
//! Duration risk per position, exposure per duration tier, and the
//! duration/yield scatter of the bond universe.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::Session;
use crate::output::print_view;
use bondscope_core::format::{format_duration, format_millions, format_percent, format_yield};
use bondscope_portfolio::risk::{
    duration_risk_profile, duration_tier_distribution, yield_curve, DurationRiskPoint,
    TierExposure, YieldPoint,
};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// What to show
    #[arg(long, value_enum, default_value = "profile")]
    pub view: RiskView,
}

/// Risk views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RiskView {
    /// Duration and credit tier per position
    Profile,
    /// Value held per duration tier
    Distribution,
    /// Duration vs yield for every bond in the universe
    Curve,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ProfileRow {
    #[tabled(rename = "Bond")]
    bond: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Duration Risk")]
    tier: String,
    #[tabled(rename = "Credit Risk")]
    credit_tier: String,
}

impl From<&DurationRiskPoint> for ProfileRow {
    fn from(point: &DurationRiskPoint) -> Self {
        Self {
            bond: point.bond_id.clone(),
            name: point.name.clone(),
            duration: format_duration(point.duration, 1),
            value: format_millions(point.market_value),
            tier: point.tier.label().to_string(),
            credit_tier: point.credit_tier.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct DistributionRow {
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Positions")]
    count: usize,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

impl From<&TierExposure> for DistributionRow {
    fn from(exposure: &TierExposure) -> Self {
        Self {
            tier: exposure.tier.label().to_string(),
            count: exposure.count,
            value: format_millions(exposure.value),
            share: format_percent(exposure.percentage, 1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Bond")]
    bond: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Yield")]
    yield_to_maturity: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Tokenized")]
    tokenized: bool,
}

impl From<&YieldPoint> for CurveRow {
    fn from(point: &YieldPoint) -> Self {
        Self {
            bond: point.bond_id.clone(),
            duration: format_duration(point.duration, 1),
            yield_to_maturity: format_yield(point.yield_to_maturity),
            rating: point.rating.to_string(),
            tokenized: point.tokenized,
        }
    }
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let session = Session::open(global)?;
    let portfolio = session.source.portfolio();
    let thresholds = &session.config.risk;

    match args.view {
        RiskView::Profile => {
            let points = duration_risk_profile(portfolio, thresholds);
            let rows: Vec<ProfileRow> = points.iter().map(ProfileRow::from).collect();
            print_view(&rows, &points, format)
        }
        RiskView::Distribution => {
            let exposure = duration_tier_distribution(portfolio, thresholds);
            let rows: Vec<DistributionRow> = exposure.iter().map(DistributionRow::from).collect();
            print_view(&rows, &exposure, format)
        }
        RiskView::Curve => {
            let points = yield_curve(session.source.bonds());
            let rows: Vec<CurveRow> = points.iter().map(CurveRow::from).collect();
            print_view(&rows, &points, format)
        }
    }
}
