//! Heatmap command implementation.
//!
//! Renders the sector x rating grid. Table output is the grid itself; CSV
//! lists one row per cell.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style, Tabled};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::Session;
use crate::output::{colored_tier, print_header, print_json, print_output, print_warning};
use bondscope_core::format::{format_fixed, format_millions, format_percent};
use bondscope_portfolio::risk::{risk_heatmap, HeatmapCell, RiskHeatmap};

/// Arguments for the heatmap command.
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    /// List cells instead of drawing the grid
    #[arg(long)]
    pub cells: bool,

    /// Hide cells without positions from the cell list
    #[arg(long)]
    pub occupied: bool,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct CellRow {
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Positions")]
    count: usize,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Color")]
    color: String,
}

impl From<&HeatmapCell> for CellRow {
    fn from(cell: &HeatmapCell) -> Self {
        Self {
            sector: cell.sector.clone(),
            rating: cell.rating.to_string(),
            value: format_millions(cell.value),
            share: format_percent(cell.percentage, 1),
            count: cell.count,
            score: format_fixed(cell.score, 1),
            tier: cell.tier.label().to_string(),
            color: cell.color.to_string(),
        }
    }
}

/// Execute the heatmap command.
pub fn execute(args: HeatmapArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let session = Session::open(global)?;
    let heatmap = risk_heatmap(
        session.source.portfolio(),
        &session.config.heatmap,
        &session.config.risk,
    );

    if heatmap.excluded > 0 {
        print_warning(&format!(
            "{} position(s) rated outside the heatmap ladder are not shown",
            heatmap.excluded
        ));
    }

    let rows: Vec<CellRow> = heatmap
        .cells
        .iter()
        .filter(|c| !args.occupied || c.count > 0)
        .map(CellRow::from)
        .collect();

    match format {
        OutputFormat::Json => print_json(&heatmap),
        OutputFormat::Csv => print_output(&rows, format),
        OutputFormat::Table if args.cells => print_output(&rows, format),
        OutputFormat::Table => {
            print_grid(&heatmap);
            Ok(())
        }
    }
}

/// Draws the grid: one row per sector, one column per ladder rating.
///
/// Occupied cells show `score (share)`; empty cells show `-`.
fn print_grid(heatmap: &RiskHeatmap) {
    if heatmap.sectors.is_empty() {
        println!("No results.");
        return;
    }

    let mut builder = Builder::default();
    let mut header = vec!["Sector".to_string()];
    header.extend(heatmap.ratings.iter().map(ToString::to_string));
    builder.push_record(header);

    for sector in &heatmap.sectors {
        let mut record = vec![sector.clone()];
        record.extend(heatmap.row(sector).map(|cell| {
            if cell.count == 0 {
                "-".to_string()
            } else {
                format!(
                    "{} ({})",
                    format_fixed(cell.score, 0),
                    format_percent(cell.percentage, 1)
                )
            }
        }));
        builder.push_record(record);
    }

    print_header("Risk Heatmap");
    println!("{}", builder.build().with(Style::rounded()));

    if let Some(hottest) = heatmap.hottest() {
        println!(
            "Hottest cell: {} / {} scoring {} ({})",
            hottest.sector,
            hottest.rating,
            format_fixed(hottest.score, 1),
            colored_tier(hottest.tier)
        );
    }
}
