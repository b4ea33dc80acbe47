//! Runtime fault conditions
//!
//! None of these are fatal. Failures are caught where a collaborator is
//! called and recorded here; the display coordinator and the firmware
//! read them back.

/// Degraded conditions the controller can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Climate sample failed; the last reading is shown as stale
    SensorUnavailable,
    /// Wall clock not set; alarm comparisons are suspended
    ClockUnsynchronized,
    /// Location lookup failed; an error line is shown
    LookupFailed,
    /// Button events were dropped because the queue was full
    QueueOverflow,
}

impl Fault {
    pub const ALL: [Fault; 4] = [
        Fault::SensorUnavailable,
        Fault::ClockUnsynchronized,
        Fault::LookupFailed,
        Fault::QueueOverflow,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of active faults
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Faults {
    bits: u8,
}

impl Faults {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn contains(&self, fault: Fault) -> bool {
        self.bits & fault.bit() != 0
    }

    /// Raise or clear a fault
    pub fn set(&mut self, fault: Fault, active: bool) {
        if active {
            self.bits |= fault.bit();
        } else {
            self.bits &= !fault.bit();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Active faults, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Fault> + '_ {
        Fault::ALL.into_iter().filter(|f| self.contains(*f))
    }
}
