//! Immutable view state and its reducer.
//!
//! UI-local selections (tab, selected bond, timeframe, view mode, allocation
//! dimension) live in a plain value. Every change goes through
//! [`ViewState::apply`], which returns a new state and leaves the old one
//! untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bondscope_portfolio::allocation::Dimension;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    /// Portfolio overview.
    #[default]
    Overview,
    /// Allocation charts.
    Allocation,
    /// Risk heatmap and duration risk.
    Risk,
    /// Compliance panel.
    Compliance,
}

/// Chart history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    /// One month.
    #[serde(rename = "1M")]
    OneMonth,
    /// Three months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// Six months.
    #[serde(rename = "6M")]
    SixMonths,
    /// One year.
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    /// Everything available.
    #[serde(rename = "ALL")]
    All,
}

impl Timeframe {
    /// Short label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::All => "ALL",
        }
    }

    /// Window length in days; `None` for everything.
    #[must_use]
    pub fn days(&self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::SixMonths => Some(180),
            Self::OneYear => Some(365),
            Self::All => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "6M" => Ok(Self::SixMonths),
            "1Y" | "12M" => Ok(Self::OneYear),
            "ALL" | "MAX" => Ok(Self::All),
            other => Err(format!("Unknown timeframe: {other}")),
        }
    }
}

/// Chart or table rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Charts.
    #[default]
    Chart,
    /// Tables.
    Table,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Chart => Self::Table,
            Self::Table => Self::Chart,
        }
    }
}

/// UI-local dashboard selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    /// Active tab.
    pub tab: Tab,
    /// Selected bond id, if any.
    pub selected_bond: Option<String>,
    /// History window.
    pub timeframe: Timeframe,
    /// Chart or table.
    pub view_mode: ViewMode,
    /// Allocation chart grouping.
    pub dimension: Dimension,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            selected_bond: None,
            timeframe: Timeframe::default(),
            view_mode: ViewMode::default(),
            dimension: Dimension::Sector,
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ViewAction {
    /// Switch tab.
    SelectTab(Tab),
    /// Select a bond; selecting the current bond again clears the selection.
    SelectBond(String),
    /// Clear the bond selection.
    ClearSelection,
    /// Change the history window.
    SetTimeframe(Timeframe),
    /// Set chart or table rendering.
    SetViewMode(ViewMode),
    /// Flip between chart and table rendering.
    ToggleViewMode,
    /// Change the allocation grouping.
    SetDimension(Dimension),
}

impl ViewState {
    /// Returns the state after `action`.
    #[must_use]
    pub fn apply(&self, action: ViewAction) -> Self {
        let mut next = self.clone();
        match action {
            ViewAction::SelectTab(tab) => next.tab = tab,
            ViewAction::SelectBond(id) => {
                next.selected_bond = if self.selected_bond.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id)
                };
            }
            ViewAction::ClearSelection => next.selected_bond = None,
            ViewAction::SetTimeframe(timeframe) => next.timeframe = timeframe,
            ViewAction::SetViewMode(mode) => next.view_mode = mode,
            ViewAction::ToggleViewMode => next.view_mode = self.view_mode.toggled(),
            ViewAction::SetDimension(dimension) => next.dimension = dimension,
        }
        next
    }

    /// Applies actions in order.
    #[must_use]
    pub fn apply_all(&self, actions: impl IntoIterator<Item = ViewAction>) -> Self {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_original_untouched() {
        let initial = ViewState::default();
        let next = initial.apply(ViewAction::SelectTab(Tab::Risk));
        assert_eq!(initial.tab, Tab::Overview);
        assert_eq!(next.tab, Tab::Risk);
    }

    #[test]
    fn test_select_bond_toggles() {
        let state = ViewState::default().apply(ViewAction::SelectBond("UST-2029".into()));
        assert_eq!(state.selected_bond.as_deref(), Some("UST-2029"));

        let other = state.apply(ViewAction::SelectBond("JPM-2034".into()));
        assert_eq!(other.selected_bond.as_deref(), Some("JPM-2034"));

        let cleared = other.apply(ViewAction::SelectBond("JPM-2034".into()));
        assert_eq!(cleared.selected_bond, None);
    }

    #[test]
    fn test_apply_all() {
        let state = ViewState::default().apply_all([
            ViewAction::SetTimeframe(Timeframe::ThreeMonths),
            ViewAction::ToggleViewMode,
            ViewAction::SetDimension(Dimension::Issuer),
            ViewAction::SelectBond("B1".into()),
            ViewAction::ClearSelection,
        ]);
        assert_eq!(state.timeframe, Timeframe::ThreeMonths);
        assert_eq!(state.view_mode, ViewMode::Table);
        assert_eq!(state.dimension, Dimension::Issuer);
        assert_eq!(state.selected_bond, None);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("3m".parse::<Timeframe>().unwrap(), Timeframe::ThreeMonths);
        assert_eq!("all".parse::<Timeframe>().unwrap(), Timeframe::All);
        assert!("2W".parse::<Timeframe>().is_err());
        assert_eq!(Timeframe::OneYear.days(), Some(365));
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&ViewAction::SetTimeframe(Timeframe::SixMonths)).unwrap();
        assert_eq!(json, r#"{"type":"set-timeframe","value":"6M"}"#);
        let action: ViewAction = serde_json::from_str(r#"{"type":"toggle-view-mode"}"#).unwrap();
        assert_eq!(action, ViewAction::ToggleViewMode);
    }
}
