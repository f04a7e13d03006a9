//! Dispatcher configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default inactivity delay before a non-sticky state reverts, in milliseconds.
pub const DEFAULT_RESET_DELAY_MS: u64 = 1000;

/// Timing policy for a [`crate::keys::KeyDispatcher`].
///
/// # Example
///
/// ```rust
/// use modechart::keys::DispatcherConfig;
/// use std::time::Duration;
///
/// let config: DispatcherConfig = serde_json::from_str(r#"{ "chord_timeout_ms": 500 }"#).unwrap();
/// assert_eq!(config.chord_timeout(), Duration::from_millis(500));
/// assert_eq!(config.reset_delay(), Duration::from_millis(1000));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Inactivity delay for non-sticky, non-transient states
    pub reset_delay_ms: u64,
    /// Inactivity delay for transient (chord prefix) states
    pub chord_timeout_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            chord_timeout_ms: DEFAULT_RESET_DELAY_MS,
        }
    }
}

impl DispatcherConfig {
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay_ms = duration_ms(delay);
        self
    }

    pub fn with_chord_timeout(mut self, timeout: Duration) -> Self {
        self.chord_timeout_ms = duration_ms(timeout);
        self
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn chord_timeout(&self) -> Duration {
        Duration::from_millis(self.chord_timeout_ms)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
