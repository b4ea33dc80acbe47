//! Inter-task communication
//!
//! Button tasks feed the shared event queue; the controller task asks the
//! storage task to persist the alarm through a latest-wins signal.

use bedside_core::{AlarmConfig, SharedEventQueue};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Button events, drained once per controller cycle
pub static EVENTS: SharedEventQueue = SharedEventQueue::new();

/// Alarm config waiting to be written to flash
///
/// Only the newest request matters, so a pending one is overwritten.
pub static SAVE_REQUEST: Signal<CriticalSectionRawMutex, AlarmConfig> = Signal::new();
