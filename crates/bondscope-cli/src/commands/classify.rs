//! Classify command implementation.
//!
//! Maps one metric value to its risk tier under the configured thresholds.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::load_config;
use crate::output::{colored_tier, print_json, print_output, KeyValue};
use bondscope_core::CreditRating;
use bondscope_portfolio::risk::{classify, color_for_score, rating_tier, RiskKind, RiskTier};

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Metric kind: duration, heatmap (score) or rating
    pub kind: RiskKind,

    /// Metric value; for `rating`, a rating such as `BBB+` or `Baa1`
    pub value: String,
}

#[derive(Debug, Serialize)]
struct Classification {
    kind: RiskKind,
    value: String,
    tier: RiskTier,
    color: String,
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(global)?;
    let thresholds = &config.risk;

    let (tier, color) = match args.kind {
        RiskKind::Rating => {
            let rating = CreditRating::parse(&args.value)
                .ok_or_else(|| anyhow::anyhow!("Unknown credit rating: {}", args.value))?;
            let tier = rating_tier(rating, thresholds);
            (tier, tier.color())
        }
        RiskKind::HeatmapScore => {
            let score = parse_number(&args.value)?;
            (classify(score, args.kind, thresholds), color_for_score(score))
        }
        RiskKind::Duration => {
            let duration = parse_number(&args.value)?;
            let tier = classify(duration, args.kind, thresholds);
            (tier, tier.color())
        }
    };

    let result = Classification {
        kind: args.kind,
        value: args.value,
        tier,
        color: color.to_string(),
    };

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Csv => print_output(
            &[
                KeyValue::new("tier", tier.label()),
                KeyValue::new("color", result.color.as_str()),
            ],
            format,
        ),
        OutputFormat::Table => {
            println!("{} {}: {}", result.kind, result.value, colored_tier(tier));
            Ok(())
        }
    }
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("Invalid number: {raw}"))
}
