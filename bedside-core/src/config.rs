//! Clock behaviour configuration
//!
//! Timing constants for the alarm and the main loop. The defaults match
//! the shipped device; boards may override them at startup.

use serde::{Deserialize, Serialize};

use crate::alarm::AlarmConfig;

/// Runtime timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// How long an alarm rings before stopping on its own (seconds)
    pub ring_duration_s: u32,
    /// Snooze length before the alarm rings again (seconds)
    pub snooze_duration_s: u32,
    /// An edit phase ends after this long without a settings press (ms)
    pub edit_idle_timeout_ms: u32,
    /// Periodic redraw interval for time-dependent views (ms)
    pub display_refresh_ms: u32,
    /// Re-sample interval while the sensor overlay is open (ms)
    pub sensor_refresh_ms: u32,
    /// Alarm used when nothing valid is stored
    pub default_alarm: AlarmConfig,
}

impl ClockConfig {
    pub fn ring_duration_ms(&self) -> u64 {
        u64::from(self.ring_duration_s) * 1000
    }

    pub fn snooze_duration_ms(&self) -> u64 {
        u64::from(self.snooze_duration_s) * 1000
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            ring_duration_s: 600,
            snooze_duration_s: 300,
            edit_idle_timeout_ms: 3000,
            display_refresh_ms: 1000,
            // DHT22 needs at least 2 s between samples
            sensor_refresh_ms: 2000,
            default_alarm: AlarmConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let config = ClockConfig::default();
        assert_eq!(config.ring_duration_ms(), 600_000);
        assert_eq!(config.snooze_duration_ms(), 300_000);
        assert_eq!(config.default_alarm, AlarmConfig::new(7, 30, false));
    }
}
