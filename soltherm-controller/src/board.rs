//! Board-status capability.
//!
//! The physical board (status LED, relay driver, ADC mux) is driven
//! elsewhere. The core only needs to signal that remote store traffic is
//! in flight, so it sees the board through this narrow trait and tests
//! can substitute a recording fake.

use std::time::Duration;

/// Blink cadences used while remote store traffic is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityPattern {
    /// Shown while the configuration object is being fetched.
    ConfigRefresh,
    /// Shown while a log record is being written.
    LogWrite,
}

impl ActivityPattern {
    /// Interval between LED toggles for this pattern.
    pub fn blink_interval(&self) -> Duration {
        match self {
            ActivityPattern::ConfigRefresh => Duration::from_millis(25),
            ActivityPattern::LogWrite => Duration::from_millis(19),
        }
    }
}

/// Capability to signal network activity on the board's status
/// indicator.
pub trait BoardStatus: Send {
    /// Start blinking at the pattern's cadence.
    fn signal_activity(&mut self, pattern: ActivityPattern);

    /// Return the indicator to its steady state.
    fn clear_activity(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_blink_faster_during_log_writes_than_config_refresh() {
        assert!(
            ActivityPattern::LogWrite.blink_interval()
                < ActivityPattern::ConfigRefresh.blink_interval()
        );
    }
}
