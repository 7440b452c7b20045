//! Compliance record shapes.
//!
//! All records load leniently: missing fields take defaults and unknown
//! status strings map to an `Unknown` variant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondscope_core::safe::de;

/// A wallet holding bond tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenHolder {
    /// Wallet address.
    pub address: String,

    /// Token balance.
    #[serde(deserialize_with = "de::lenient_decimal")]
    pub balance: Decimal,

    /// On the transfer whitelist.
    pub whitelisted: bool,

    /// Account frozen by compliance.
    pub frozen: bool,

    /// KYC completed.
    #[serde(alias = "kyc")]
    pub kyc_verified: bool,
}

impl TokenHolder {
    /// True if the holder can currently send or receive tokens.
    #[must_use]
    pub fn can_transfer(&self) -> bool {
        self.whitelisted && self.kyc_verified && !self.frozen
    }

    /// Shortened address for tables.
    #[must_use]
    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }
}

/// Shortens a wallet address to `0x1234...abcd`; short inputs are returned as is.
#[must_use]
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// A transfer-restriction rule enforced by the token contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceRule {
    /// Rule identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the rule is enforced.
    pub active: bool,
    /// What the rule checks.
    pub description: String,
}

/// Outcome of a token transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Settled on chain.
    Completed,
    /// Awaiting settlement.
    Pending,
    /// Rejected by a compliance rule.
    Blocked,
    /// Failed for another reason.
    Failed,
    /// Unrecognised status.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransferStatus {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A token transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferEvent {
    /// Event identifier.
    pub id: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Token amount.
    #[serde(deserialize_with = "de::lenient_decimal")]
    pub amount: Decimal,
    /// Outcome.
    pub status: TransferStatus,
    /// Event time.
    pub timestamp: DateTime<Utc>,
}

/// Pause-control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseAction {
    /// Contract paused.
    #[serde(alias = "paused")]
    Pause,
    /// Contract resumed.
    #[serde(alias = "unpaused", alias = "resume")]
    Unpause,
    /// Unrecognised action.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PauseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Unknown => "unknown",
        })
    }
}

/// A contract pause or unpause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PauseEvent {
    /// Event identifier.
    pub id: String,
    /// Pause or unpause.
    pub action: PauseAction,
    /// Operator-supplied reason.
    pub reason: String,
    /// Block the action landed in.
    pub block_number: u64,
    /// Event time.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holder_transfer_eligibility() {
        let holder = TokenHolder {
            address: "0xabc".into(),
            balance: dec!(10),
            whitelisted: true,
            frozen: false,
            kyc_verified: true,
        };
        assert!(holder.can_transfer());
        assert!(!TokenHolder { frozen: true, ..holder.clone() }.can_transfer());
        assert!(!TokenHolder { kyc_verified: false, ..holder }.can_transfer());
    }

    #[test]
    fn test_short_address() {
        let holder = TokenHolder {
            address: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".into(),
            ..TokenHolder::default()
        };
        assert_eq!(holder.short_address(), "0x742d...f44e");
        let short = TokenHolder {
            address: "0xabc".into(),
            ..TokenHolder::default()
        };
        assert_eq!(short.short_address(), "0xabc");
    }

    #[test]
    fn test_lenient_transfer() {
        let event: TransferEvent = serde_json::from_str(
            r#"{"id": "tx1", "amount": "1500.5", "status": "reverted", "timestamp": "2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(event.amount, dec!(1500.5));
        assert_eq!(event.status, TransferStatus::Unknown);
        assert_eq!(event.from, "");
    }

    #[test]
    fn test_pause_aliases() {
        let event: PauseEvent =
            serde_json::from_str(r#"{"id": "p1", "action": "paused", "blockNumber": 19000000}"#)
                .unwrap();
        assert_eq!(event.action, PauseAction::Pause);
        assert_eq!(event.block_number, 19_000_000);
        assert_eq!(event.action.to_string(), "pause");
    }
}
