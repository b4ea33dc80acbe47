//! Alarm time and armed flag

use serde::{Deserialize, Serialize};

use crate::traits::WallClock;

/// The user's alarm setting
///
/// Survives trigger/snooze cycles and power cycles (see `persist`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    pub armed: bool,
}

impl AlarmConfig {
    /// Create a config, wrapping out-of-range fields into range
    pub const fn new(hour: u8, minute: u8, armed: bool) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            armed,
        }
    }

    /// Check that hour and minute are in range
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Check if the clock is inside the alarm minute
    pub fn matches(&self, clock: &WallClock) -> bool {
        self.hour == clock.hour && self.minute == clock.minute
    }

    /// Same time with the armed flag replaced
    pub fn with_armed(self, armed: bool) -> Self {
        Self { armed, ..self }
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self::new(7, 30, false)
    }
}
