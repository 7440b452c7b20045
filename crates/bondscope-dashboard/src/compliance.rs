//! Simulated compliance controls.
//!
//! Contract pause, per-account freeze and per-rule toggles. Each action
//! completes after a fixed simulated latency. A control with an action in
//! flight rejects further actions with [`ControlError::ActionPending`]; other
//! controls stay usable.
//!
//! Handles are cheap to clone and share one state.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::time::sleep;

use crate::error::ControlError;
use bondscope_config::ComplianceConfig;
use bondscope_demo::{ComplianceRule, DemoDataSource, PauseAction, PauseEvent, TokenHolder};

/// Identifies one control for pending checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Contract-wide pause switch.
    Pause,
    /// Freeze switch of one account.
    Account(String),
    /// Enforcement switch of one rule.
    Rule(String),
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pause => f.write_str("contract pause"),
            Self::Account(address) => write!(f, "account {address}"),
            Self::Rule(id) => write!(f, "rule {id}"),
        }
    }
}

/// Simulated latency per action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDelays {
    /// Pause / unpause.
    pub pause: Duration,
    /// Freeze / unfreeze.
    pub freeze: Duration,
    /// Rule toggle.
    pub rule: Duration,
}

impl Default for ActionDelays {
    fn default() -> Self {
        Self::from(&ComplianceConfig::default())
    }
}

impl From<&ComplianceConfig> for ActionDelays {
    fn from(config: &ComplianceConfig) -> Self {
        Self {
            pause: Duration::from_millis(config.pause_delay_ms),
            freeze: Duration::from_millis(config.freeze_delay_ms),
            rule: Duration::from_millis(config.rule_delay_ms),
        }
    }
}

#[derive(Debug, Default)]
struct ControlState {
    paused: bool,
    holders: Vec<TokenHolder>,
    rules: Vec<ComplianceRule>,
    pause_events: Vec<PauseEvent>,
    pending: HashSet<ControlId>,
    next_block: u64,
    next_pause_id: u64,
}

/// Marks a control pending for as long as it lives.
///
/// Completing the action clears the mark under the caller's lock; dropping an
/// unfinished action (timeout, `select!`, aborted task) clears it in `Drop`.
struct PendingAction {
    state: Arc<Mutex<ControlState>>,
    control: Option<ControlId>,
}

impl PendingAction {
    fn begin(state: &Arc<Mutex<ControlState>>, control: ControlId) -> Result<Self, ControlError> {
        let mut guard = state.lock();
        if guard.pending.contains(&control) {
            return Err(ControlError::pending(control.to_string()));
        }
        guard.pending.insert(control.clone());
        Ok(Self {
            state: Arc::clone(state),
            control: Some(control),
        })
    }

    fn complete(mut self, state: &mut ControlState) {
        if let Some(control) = self.control.take() {
            state.pending.remove(&control);
        }
    }
}

impl Drop for PendingAction {
    fn drop(&mut self) {
        if let Some(control) = self.control.take() {
            tracing::debug!(%control, "pending action dropped before completion");
            self.state.lock().pending.remove(&control);
        }
    }
}

/// Shared handle to the compliance panel state.
#[derive(Debug, Clone)]
pub struct ComplianceControls {
    state: Arc<Mutex<ControlState>>,
    delays: ActionDelays,
}

impl ComplianceControls {
    /// Seeds the panel from a data source.
    ///
    /// The contract starts paused if the newest pause event is a pause.
    pub fn from_source(source: &dyn DemoDataSource, delays: ActionDelays) -> Self {
        let pause_events = source.pause_events().to_vec();
        let paused = pause_events
            .first()
            .is_some_and(|e| e.action == PauseAction::Pause);
        let next_block = pause_events
            .iter()
            .map(|e| e.block_number)
            .max()
            .map_or(1, |b| b + 1);
        let next_pause_id = pause_events
            .iter()
            .filter_map(|e| e.id.rsplit('-').next()?.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n + 1);

        Self {
            state: Arc::new(Mutex::new(ControlState {
                paused,
                holders: source.token_holders().to_vec(),
                rules: source.compliance_rules().to_vec(),
                pause_events,
                pending: HashSet::new(),
                next_block,
                next_pause_id,
            })),
            delays,
        }
    }

    /// True if the contract is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    /// True if `control` has an action in flight.
    #[must_use]
    pub fn is_pending(&self, control: &ControlId) -> bool {
        self.state.lock().pending.contains(control)
    }

    /// Snapshot of token holders.
    #[must_use]
    pub fn holders(&self) -> Vec<TokenHolder> {
        self.state.lock().holders.clone()
    }

    /// Snapshot of compliance rules.
    #[must_use]
    pub fn rules(&self) -> Vec<ComplianceRule> {
        self.state.lock().rules.clone()
    }

    /// Snapshot of pause history, newest first.
    #[must_use]
    pub fn pause_events(&self) -> Vec<PauseEvent> {
        self.state.lock().pause_events.clone()
    }

    /// Pauses a running contract or resumes a paused one.
    ///
    /// Returns the recorded event.
    pub async fn toggle_pause(
        &self,
        reason: impl Into<String>,
    ) -> Result<PauseEvent, ControlError> {
        let pending = PendingAction::begin(&self.state, ControlId::Pause)?;
        sleep(self.delays.pause).await;

        let mut state = self.state.lock();
        pending.complete(&mut state);
        state.paused = !state.paused;
        let action = if state.paused {
            PauseAction::Pause
        } else {
            PauseAction::Unpause
        };
        let event = PauseEvent {
            id: format!("pause-{}", state.next_pause_id),
            action,
            reason: reason.into(),
            block_number: state.next_block,
            timestamp: Utc::now(),
        };
        state.next_block += 1;
        state.next_pause_id += 1;
        state.pause_events.insert(0, event.clone());

        tracing::info!(
            action = %event.action,
            block = event.block_number,
            "contract pause toggled"
        );
        Ok(event)
    }

    /// Freezes or unfreezes an account. Returns the new frozen flag.
    pub async fn toggle_freeze(&self, address: &str) -> Result<bool, ControlError> {
        if !self.state.lock().holders.iter().any(|h| h.address == address) {
            return Err(ControlError::UnknownAccount(address.to_string()));
        }
        let control = ControlId::Account(address.to_string());
        let pending = PendingAction::begin(&self.state, control)?;
        sleep(self.delays.freeze).await;

        let mut state = self.state.lock();
        pending.complete(&mut state);
        let frozen = state
            .holders
            .iter_mut()
            .find(|h| h.address == address)
            .map(|h| {
                h.frozen = !h.frozen;
                h.frozen
            })
            .ok_or_else(|| ControlError::UnknownAccount(address.to_string()))?;

        tracing::info!(account = address, frozen, "account freeze toggled");
        Ok(frozen)
    }

    /// Enables or disables a rule. Returns the new active flag.
    pub async fn toggle_rule(&self, rule_id: &str) -> Result<bool, ControlError> {
        if !self.state.lock().rules.iter().any(|r| r.id == rule_id) {
            return Err(ControlError::UnknownRule(rule_id.to_string()));
        }
        let control = ControlId::Rule(rule_id.to_string());
        let pending = PendingAction::begin(&self.state, control)?;
        sleep(self.delays.rule).await;

        let mut state = self.state.lock();
        pending.complete(&mut state);
        let active = state
            .rules
            .iter_mut()
            .find(|r| r.id == rule_id)
            .map(|r| {
                r.active = !r.active;
                r.active
            })
            .ok_or_else(|| ControlError::UnknownRule(rule_id.to_string()))?;

        tracing::info!(rule = rule_id, active, "compliance rule toggled");
        Ok(active)
    }
}
