//! Built-in demo dataset.
//!
//! Fixed content, no randomness: every session sees the same book.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::records::{
    ComplianceRule, PauseAction, PauseEvent, TokenHolder, TransferEvent, TransferStatus,
};
use crate::source::{DemoDataSource, DemoDataset};
use bondscope_core::{Bond, CreditRating, Portfolio, Position};

/// The built-in dataset of a small tokenized bond fund.
///
/// # Example
///
/// ```rust
/// use bondscope_demo::{DemoDataSource, StaticDemoSource};
///
/// let source = StaticDemoSource::new();
/// assert_eq!(source.portfolio().len(), 9);
/// assert!(source.bonds().len() > source.portfolio().len());
/// ```
#[derive(Debug, Clone)]
pub struct StaticDemoSource {
    dataset: DemoDataset,
}

impl Default for StaticDemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticDemoSource {
    /// Builds the dataset.
    #[must_use]
    pub fn new() -> Self {
        let universe = bond_universe();
        // Ford is on the watch list only
        let holdings = [
            ("UST-2029", dec!(4_200_000)),
            ("UST-2044", dec!(2_600_000)),
            ("EIB-2031", dec!(1_800_000)),
            ("AAPL-2030", dec!(1_500_000)),
            ("JPM-2034", dec!(1_350_000)),
            ("NEE-2041", dec!(950_000)),
            ("MSFT-2027", dec!(700_000)),
            ("CA-GO-2037", dec!(600_000)),
            ("PFE-2053", dec!(400_000)),
        ];
        let positions = holdings
            .iter()
            .filter_map(|(id, value)| {
                universe
                    .iter()
                    .find(|b| b.id == *id)
                    .map(|bond| Position::new(bond.clone(), *value))
            })
            .collect();

        let mut dataset = DemoDataset {
            portfolio: Portfolio::from_positions(positions),
            bonds: universe,
            token_holders: token_holders(),
            compliance_rules: compliance_rules(),
            transfer_events: transfer_events(),
            pause_events: pause_events(),
        };
        dataset.normalize();
        Self { dataset }
    }

    /// The dataset.
    #[must_use]
    pub fn dataset(&self) -> &DemoDataset {
        &self.dataset
    }

    /// Consumes the source, returning the dataset.
    #[must_use]
    pub fn into_dataset(self) -> DemoDataset {
        self.dataset
    }
}

impl DemoDataSource for StaticDemoSource {
    fn name(&self) -> &str {
        "built-in demo"
    }

    fn portfolio(&self) -> &Portfolio {
        &self.dataset.portfolio
    }

    fn bonds(&self) -> &[Bond] {
        &self.dataset.bonds
    }

    fn token_holders(&self) -> &[TokenHolder] {
        &self.dataset.token_holders
    }

    fn compliance_rules(&self) -> &[ComplianceRule] {
        &self.dataset.compliance_rules
    }

    fn transfer_events(&self) -> &[TransferEvent] {
        &self.dataset.transfer_events
    }

    fn pause_events(&self) -> &[PauseEvent] {
        &self.dataset.pause_events
    }
}

// =============================================================================
// CONTENT
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn bond(
    id: &str,
    name: &str,
    issuer: &str,
    sector: &str,
    rating: CreditRating,
    duration: f64,
    ytm: f64,
    coupon: f64,
    maturity: (i32, u32, u32),
    tokenized: bool,
) -> Bond {
    let mut bond = Bond::new(id, name)
        .with_issuer(issuer)
        .with_sector(sector)
        .with_rating(rating)
        .with_duration(duration)
        .with_yield(ytm)
        .with_coupon(coupon)
        .tokenized(tokenized);
    bond.maturity = NaiveDate::from_ymd_opt(maturity.0, maturity.1, maturity.2);
    bond
}

#[rustfmt::skip]
fn bond_universe() -> Vec<Bond> {
    use CreditRating::*;

    vec![
        bond("UST-2029", "US Treasury 4.25% 2029", "US Treasury", "Government", AAA, 4.3, 4.18, 4.25, (2029, 11, 15), true),
        bond("UST-2044", "US Treasury 4.625% 2044", "US Treasury", "Government", AAA, 14.8, 4.52, 4.625, (2044, 5, 15), true),
        bond("EIB-2031", "EIB Climate Awareness 2031", "European Investment Bank", "Government", AAA, 6.2, 3.05, 2.875, (2031, 6, 13), true),
        bond("AAPL-2030", "Apple 4.0% 2030", "Apple Inc.", "Technology", AAPlus, 5.1, 4.62, 4.0, (2030, 5, 10), false),
        bond("JPM-2034", "JPMorgan 5.35% 2034", "JPMorgan Chase", "Financial", AMinus, 7.6, 5.21, 5.35, (2034, 6, 1), true),
        bond("NEE-2041", "NextEra Green 5.9% 2041", "NextEra Energy", "Utilities", BBBPlus, 11.9, 5.74, 5.9, (2041, 3, 1), true),
        bond("MSFT-2027", "Microsoft 3.3% 2027", "Microsoft", "Technology", AAA, 2.2, 4.35, 3.3, (2027, 2, 6), false),
        bond("CA-GO-2037", "California GO 4.5% 2037", "State of California", "Municipal", AAMinus, 9.4, 3.88, 4.5, (2037, 4, 1), true),
        bond("PFE-2053", "Pfizer 5.3% 2053", "Pfizer", "Healthcare", APlus, 17.3, 5.36, 5.3, (2053, 5, 19), false),
        bond("F-2028", "Ford Credit 6.8% 2028", "Ford Motor Credit", "Corporate", BBPlus, 3.1, 6.85, 6.8, (2028, 5, 12), false),
    ]
}

fn holder(address: &str, balance: Decimal, whitelisted: bool, frozen: bool, kyc: bool) -> TokenHolder {
    TokenHolder {
        address: address.to_string(),
        balance,
        whitelisted,
        frozen,
        kyc_verified: kyc,
    }
}

fn token_holders() -> Vec<TokenHolder> {
    vec![
        holder("0x742d35Cc6634C0532925a3b844Bc454e4438f44e", dec!(2_500_000), true, false, true),
        holder("0x8ba1f109551bD432803012645Ac136ddd64DBA72", dec!(1_750_000), true, false, true),
        holder("0xdAC17F958D2ee523a2206206994597C13D831ec7", dec!(980_000), true, true, true),
        holder("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", dec!(420_000), false, false, true),
        holder("0x6B175474E89094C44Da98b954EedeAC495271d0F", dec!(150_000), true, false, false),
        holder("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", dec!(75_000), false, true, false),
    ]
}

fn rule(id: &str, name: &str, active: bool, description: &str) -> ComplianceRule {
    ComplianceRule {
        id: id.to_string(),
        name: name.to_string(),
        active,
        description: description.to_string(),
    }
}

fn compliance_rules() -> Vec<ComplianceRule> {
    vec![
        rule("kyc-required", "KYC Required", true, "Both parties must have completed KYC"),
        rule("whitelist-only", "Whitelist Only", true, "Transfers only between whitelisted wallets"),
        rule("accredited", "Accredited Investors", true, "Recipients must be accredited investors"),
        rule("max-holding", "Max Holding 10%", false, "No wallet may hold more than 10% of supply"),
        rule("jurisdiction", "Jurisdiction Block", true, "Blocks transfers to sanctioned jurisdictions"),
        rule("lockup", "Lock-up Period", false, "Primary allocations locked for 90 days"),
    ]
}

fn at(unix: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix, 0).unwrap_or_default()
}

fn transfer(
    id: &str,
    from: &str,
    to: &str,
    amount: Decimal,
    status: TransferStatus,
    unix: i64,
) -> TransferEvent {
    TransferEvent {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        amount,
        status,
        timestamp: at(unix),
    }
}

fn transfer_events() -> Vec<TransferEvent> {
    use TransferStatus::*;

    let a = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
    let b = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
    let c = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
    let d = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";
    vec![
        transfer("tx-1006", a, b, dec!(50_000), Completed, 1_717_243_200),
        transfer("tx-1005", b, d, dec!(25_000), Blocked, 1_717_156_800),
        transfer("tx-1004", c, a, dec!(10_000), Blocked, 1_717_070_400),
        transfer("tx-1003", a, b, dec!(125_000), Pending, 1_716_984_000),
        transfer("tx-1002", b, a, dec!(80_000), Completed, 1_716_897_600),
        transfer("tx-1001", a, c, dec!(5_000), Failed, 1_716_811_200),
    ]
}

fn pause_events() -> Vec<PauseEvent> {
    let event = |id: &str, action, reason: &str, block_number, unix| PauseEvent {
        id: id.to_string(),
        action,
        reason: reason.to_string(),
        block_number,
        timestamp: at(unix),
    };
    vec![
        event("pause-3", PauseAction::Unpause, "Oracle feed restored", 19_874_310, 1_716_552_000),
        event("pause-2", PauseAction::Pause, "Price oracle outage", 19_873_950, 1_716_547_680),
        event("pause-1", PauseAction::Unpause, "Upgrade complete", 19_512_004, 1_712_174_400),
    ]
}
