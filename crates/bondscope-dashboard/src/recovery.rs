//! Render recovery boundary.
//!
//! Wraps a fallible render step. A failure moves the boundary to `Error`, then
//! `Retrying` while it waits out an exponential delay, and back to `Ok` on the
//! next success. Once the retry budget is spent the boundary is `Exhausted`
//! and stays there until [`RecoveryBoundary::reset`].
//!
//! ```text
//!        fail            delay             success
//!   Ok ───────▶ Error ──────────▶ Retrying ─────────▶ Ok
//!                 ▲                  │ fail
//!                 └──────────────────┘
//!                 │ budget spent
//!                 ▼
//!             Exhausted ──reset──▶ Ok
//! ```

use std::fmt::Display;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::error::RecoveryError;
use bondscope_config::RecoveryConfig;

// =============================================================================
// RETRY POLICY
// =============================================================================

/// Bounded retries with exponential delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied after each retry.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
        }
    }
}

impl From<&RecoveryConfig> for RetryPolicy {
    fn from(config: &RecoveryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            backoff_factor: config.backoff_factor,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `base * factor^retry`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = if self.backoff_factor.is_finite() && self.backoff_factor > 0.0 {
            self.backoff_factor
        } else {
            1.0
        };
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let millis = self.base_delay.as_millis() as f64 * factor.powi(exponent);
        // Saturate rather than overflow on absurd retry counts
        Duration::from_millis(millis.min(u64::MAX as f64) as u64)
    }

    /// Sum of every retry delay.
    #[must_use]
    pub fn total_delay(&self) -> Duration {
        (0..self.max_retries).map(|r| self.delay_for_retry(r)).sum()
    }
}

// =============================================================================
// BOUNDARY
// =============================================================================

/// Boundary state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RecoveryState {
    /// Last render succeeded (or nothing rendered yet).
    Ok,
    /// The last render failed.
    Error {
        /// Failure message.
        message: String,
    },
    /// Waiting before retry number `attempt` (1-based).
    Retrying {
        /// Retry number.
        attempt: u32,
        /// Delay before the retry, in milliseconds.
        delay_ms: u64,
    },
    /// No retries left.
    Exhausted {
        /// Final failure message.
        message: String,
    },
}

impl RecoveryState {
    /// Short name for logs and status lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error { .. } => "error",
            Self::Retrying { .. } => "retrying",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}

/// Runs render steps, retrying failures under a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RecoveryBoundary {
    policy: RetryPolicy,
    state: RecoveryState,
    retries: u32,
    history: Vec<RecoveryState>,
}

impl Default for RecoveryBoundary {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl RecoveryBoundary {
    /// Creates a boundary in the `Ok` state.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RecoveryState::Ok,
            retries: 0,
            history: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &RecoveryState {
        &self.state
    }

    /// Every state entered since creation or the last reset, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RecoveryState] {
        &self.history
    }

    /// Retries spent on the current failure streak.
    #[must_use]
    pub fn retries_used(&self) -> u32 {
        self.retries
    }

    /// The policy in force.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Message to show in place of the failed view, if any.
    #[must_use]
    pub fn fallback_message(&self) -> Option<String> {
        match &self.state {
            RecoveryState::Ok => None,
            RecoveryState::Error { message } => Some(format!("Something went wrong: {message}")),
            RecoveryState::Retrying { attempt, .. } => Some(format!(
                "Retrying ({attempt}/{})...",
                self.policy.max_retries
            )),
            RecoveryState::Exhausted { .. } => Some(
                "This view could not be recovered. Please reload the dashboard.".to_string(),
            ),
        }
    }

    /// Clears the failure streak and returns to `Ok` (the manual "try again").
    pub fn reset(&mut self) {
        self.retries = 0;
        self.history.clear();
        self.transition(RecoveryState::Ok);
    }

    /// Runs `render`, retrying failures with backoff until it succeeds or the
    /// retry budget is spent.
    ///
    /// An exhausted boundary fails immediately without calling `render`.
    pub async fn render<F, T, E>(&mut self, mut render: F) -> Result<T, RecoveryError>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        if let RecoveryState::Exhausted { message } = &self.state {
            return Err(RecoveryError::Exhausted {
                attempts: self.retries + 1,
                last_error: message.clone(),
            });
        }

        loop {
            match render() {
                Ok(value) => {
                    if self.state != RecoveryState::Ok {
                        tracing::info!(retries = self.retries, "view recovered");
                        self.transition(RecoveryState::Ok);
                    }
                    self.retries = 0;
                    return Ok(value);
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(error = %message, retries = self.retries, "render failed");
                    self.transition(RecoveryState::Error {
                        message: message.clone(),
                    });

                    if self.retries >= self.policy.max_retries {
                        tracing::warn!(
                            max_retries = self.policy.max_retries,
                            "render retries exhausted"
                        );
                        self.transition(RecoveryState::Exhausted {
                            message: message.clone(),
                        });
                        return Err(RecoveryError::Exhausted {
                            attempts: self.retries + 1,
                            last_error: message,
                        });
                    }

                    let delay = self.policy.delay_for_retry(self.retries);
                    self.retries += 1;
                    self.transition(RecoveryState::Retrying {
                        attempt: self.retries,
                        delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    });
                    sleep(delay).await;
                }
            }
        }
    }

    fn transition(&mut self, next: RecoveryState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "recovery transition");
        self.history.push(next.clone());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
        assert_eq!(policy.total_delay(), Duration::from_secs(7));
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_for_retry(u32::MAX) >= Duration::from_secs(1));
    }

    #[test]
    fn test_policy_from_config() {
        let config = RecoveryConfig {
            max_retries: 5,
            base_delay_ms: 250,
            backoff_factor: 3.0,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(2250));
    }

    #[test]
    fn test_fallback_messages() {
        let mut boundary = RecoveryBoundary::default();
        assert!(boundary.fallback_message().is_none());
        boundary.transition(RecoveryState::Exhausted {
            message: "x".into(),
        });
        assert!(boundary.fallback_message().unwrap().contains("reload"));
        boundary.reset();
        assert_eq!(boundary.state(), &RecoveryState::Ok);
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&RecoveryState::Retrying {
            attempt: 1,
            delay_ms: 1000,
        })
        .unwrap();
        assert_eq!(json, r#"{"state":"retrying","attempt":1,"delay_ms":1000}"#);
    }
}
