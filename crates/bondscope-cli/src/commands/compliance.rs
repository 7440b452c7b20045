//! Compliance command implementation.
//!
//! Lists holders, rules, transfers and pause history, and runs the simulated
//! pause, freeze and rule actions. Simulated actions only change this
//! invocation's copy of the data.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::Session;
use crate::output::{print_info, print_json, print_output, print_success, print_view};
use bondscope_dashboard::{ActionDelays, ComplianceControls};
use bondscope_demo::{
    shorten_address, ComplianceRule, PauseEvent, TokenHolder, TransferEvent, TransferStatus,
};

/// Arguments for the compliance command.
#[derive(Args, Debug)]
pub struct ComplianceArgs {
    #[command(subcommand)]
    pub command: ComplianceCommand,
}

/// Compliance subcommands.
#[derive(Subcommand, Debug)]
pub enum ComplianceCommand {
    /// List token holders
    Holders {
        /// Only show frozen accounts
        #[arg(long)]
        frozen: bool,
    },

    /// List transfer restriction rules
    Rules,

    /// List transfers, newest first
    Transfers {
        /// Only show transfers with this status
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },

    /// List pause history, newest first
    Pauses,

    /// Pause the contract, or resume it if paused (simulated)
    Pause {
        /// Reason recorded with the event
        #[arg(long, default_value = "Manual action")]
        reason: String,
    },

    /// Freeze an account, or unfreeze it if frozen (simulated)
    Freeze {
        /// Holder address
        address: String,
    },

    /// Enable or disable a rule (simulated)
    ToggleRule {
        /// Rule identifier
        id: String,
    },
}

/// Transfer status options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    /// Settled on chain
    Completed,
    /// Awaiting settlement
    Pending,
    /// Rejected by a compliance rule
    Blocked,
    /// Failed for another reason
    Failed,
}

impl From<StatusFilter> for TransferStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Completed => TransferStatus::Completed,
            StatusFilter::Pending => TransferStatus::Pending,
            StatusFilter::Blocked => TransferStatus::Blocked,
            StatusFilter::Failed => TransferStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct HolderRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Whitelisted")]
    whitelisted: bool,
    #[tabled(rename = "KYC")]
    kyc_verified: bool,
    #[tabled(rename = "Frozen")]
    frozen: bool,
    #[tabled(rename = "Can Transfer")]
    can_transfer: bool,
}

impl From<&TokenHolder> for HolderRow {
    fn from(holder: &TokenHolder) -> Self {
        Self {
            address: holder.short_address(),
            balance: holder.balance.round_dp(2).to_string(),
            whitelisted: holder.whitelisted,
            kyc_verified: holder.kyc_verified,
            frozen: holder.frozen,
            can_transfer: holder.can_transfer(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct RuleRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Rule")]
    name: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ComplianceRule> for RuleRow {
    fn from(rule: &ComplianceRule) -> Self {
        Self {
            id: rule.id.clone(),
            name: rule.name.clone(),
            active: rule.active,
            description: rule.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct TransferRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    timestamp: String,
}

impl From<&TransferEvent> for TransferRow {
    fn from(event: &TransferEvent) -> Self {
        Self {
            id: event.id.clone(),
            from: shorten_address(&event.from),
            to: shorten_address(&event.to),
            amount: event.amount.round_dp(2).to_string(),
            status: event.status.label().to_string(),
            timestamp: event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct PauseRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Block")]
    block_number: u64,
    #[tabled(rename = "Time")]
    timestamp: String,
}

impl From<&PauseEvent> for PauseRow {
    fn from(event: &PauseEvent) -> Self {
        Self {
            id: event.id.clone(),
            action: event.action.to_string(),
            reason: event.reason.clone(),
            block_number: event.block_number,
            timestamp: event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute the compliance command.
pub fn execute(args: ComplianceArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let session = Session::open(global)?;
    let source = &*session.source;

    match args.command {
        ComplianceCommand::Holders { frozen } => {
            let holders: Vec<&TokenHolder> = source
                .token_holders()
                .iter()
                .filter(|h| !frozen || h.frozen)
                .collect();
            let rows: Vec<HolderRow> = holders.iter().copied().map(HolderRow::from).collect();
            print_view(&rows, &holders, format)
        }
        ComplianceCommand::Rules => {
            let rules = source.compliance_rules();
            let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
            print_view(&rows, rules, format)
        }
        ComplianceCommand::Transfers { status } => {
            let status = status.map(TransferStatus::from);
            let transfers: Vec<&TransferEvent> = source
                .transfer_events()
                .iter()
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            let rows: Vec<TransferRow> =
                transfers.iter().copied().map(TransferRow::from).collect();
            print_view(&rows, &transfers, format)
        }
        ComplianceCommand::Pauses => {
            let events = source.pause_events();
            let rows: Vec<PauseRow> = events.iter().map(PauseRow::from).collect();
            print_view(&rows, events, format)
        }
        ComplianceCommand::Pause { reason } => {
            let controls = controls(&session);
            let event = runtime()?.block_on(controls.toggle_pause(reason))?;
            let message = format!(
                "Contract {} at block {}",
                if controls.is_paused() { "paused" } else { "resumed" },
                event.block_number
            );
            finish_action(&message, &[PauseRow::from(&event)], &event, format)
        }
        ComplianceCommand::Freeze { address } => {
            let controls = controls(&session);
            let frozen = runtime()?.block_on(controls.toggle_freeze(&address))?;
            let message = format!(
                "Account {} {}",
                shorten_address(&address),
                if frozen { "frozen" } else { "unfrozen" }
            );
            let holders = controls.holders();
            let holder: Vec<&TokenHolder> =
                holders.iter().filter(|h| h.address == address).collect();
            let rows: Vec<HolderRow> = holder.iter().copied().map(HolderRow::from).collect();
            finish_action(&message, &rows, &holder, format)
        }
        ComplianceCommand::ToggleRule { id } => {
            let controls = controls(&session);
            let active = runtime()?.block_on(controls.toggle_rule(&id))?;
            let message = format!("Rule {} {}", id, if active { "enabled" } else { "disabled" });
            let rules = controls.rules();
            let rule: Vec<&ComplianceRule> = rules.iter().filter(|r| r.id == id).collect();
            let rows: Vec<RuleRow> = rule.iter().copied().map(RuleRow::from).collect();
            finish_action(&message, &rows, &rule, format)
        }
    }
}

fn controls(session: &Session) -> ComplianceControls {
    ComplianceControls::from_source(
        &*session.source,
        ActionDelays::from(&session.config.compliance),
    )
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?)
}

/// Prints the outcome of a simulated action.
///
/// Status lines only appear in table output so JSON and CSV stay parseable.
fn finish_action<R, J>(message: &str, rows: &[R], json: &J, format: OutputFormat) -> Result<()>
where
    R: Serialize + Tabled,
    J: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => print_json(json),
        OutputFormat::Csv => print_output(rows, format),
        OutputFormat::Table => {
            print_success(message);
            print_output(rows, format)?;
            print_info("Simulated action: the change is not persisted.");
            Ok(())
        }
    }
}
