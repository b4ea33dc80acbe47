//! Information overlays
//!
//! Overlays sit on top of the alarm views and never touch alarm state.
//! At most one is open; any button press dismisses it.

use crate::traits::{LocationData, LookupError, SensorError, SensorReading};

/// Climate overlay contents
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPanel {
    /// Most recent good sample, possibly from before the overlay opened
    pub reading: Option<SensorReading>,
    /// Set when the latest sample attempt failed
    pub stale: bool,
    /// Uptime at which to sample again (ms)
    pub next_sample_ms: u64,
}

impl SensorPanel {
    /// Open with whatever reading is already known; samples immediately
    pub fn open(last: Option<SensorReading>, now_ms: u64) -> Self {
        Self {
            reading: last,
            stale: false,
            next_sample_ms: now_ms,
        }
    }

    pub fn sample_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_sample_ms
    }

    /// Record a sample attempt and schedule the next one
    pub fn record(
        &mut self,
        sample: Result<SensorReading, SensorError>,
        now_ms: u64,
        interval_ms: u64,
    ) {
        match sample {
            Ok(reading) => {
                self.reading = Some(reading);
                self.stale = false;
            }
            Err(_) => self.stale = true,
        }
        self.next_sample_ms = now_ms.saturating_add(interval_ms);
    }
}

/// Which overlay, if any, is on screen
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Overlay {
    #[default]
    None,
    Sensor(SensorPanel),
    /// Result of one on-demand lookup; no automatic retry
    Location(Result<LocationData, LookupError>),
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }
}
