//! Summary command implementation.

use anyhow::Result;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::Session;
use crate::output::{print_header, print_json, print_output, KeyValue};
use bondscope_core::format::{format_duration, format_millions, format_percent, format_yield};
use bondscope_dashboard::PortfolioSummary;

/// Execute the summary command.
pub fn execute(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let session = Session::open(global)?;
    let summary = PortfolioSummary::compute(&*session.source, &session.config);

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    let largest_sector = summary.largest_sector.as_ref().map_or_else(
        || "-".to_string(),
        |g| format!("{} ({})", g.key, format_percent(g.percentage, 1)),
    );
    let hottest_cell = summary.hottest_cell.as_ref().map_or_else(
        || "-".to_string(),
        |c| format!("{} / {} ({})", c.sector, c.rating, c.tier),
    );

    let rows = vec![
        KeyValue::new("Source", summary.source.as_str()),
        KeyValue::new("Total Value", format_millions(summary.total_value)),
        KeyValue::new("Positions", summary.position_count.to_string()),
        KeyValue::new("Average Duration", format_duration(summary.average_duration, 2)),
        KeyValue::new("Average Yield", format_yield(summary.average_yield)),
        KeyValue::new("Average Rating", summary.average_rating.to_string()),
        KeyValue::new("Tokenized", format_percent(summary.tokenized_percentage, 1)),
        KeyValue::new("Largest Sector", largest_sector),
        KeyValue::new("Hottest Cell", hottest_cell),
        KeyValue::new("Frozen Accounts", summary.frozen_accounts.to_string()),
        KeyValue::new("Active Rules", summary.active_rules.to_string()),
        KeyValue::new("Pending Transfers", summary.pending_transfers.to_string()),
    ];

    if format == OutputFormat::Table {
        print_header("Portfolio Summary");
    }
    print_output(&rows, format)
}
