//! Board-agnostic core logic for the bedside alarm clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware:
//!
//! - Collaborator traits (clock, audio, climate sensor, location lookup)
//! - Bounded event queue between button interrupts and the main loop
//! - Alarm state machine (idle, settings edit, ringing, snoozed)
//! - Sensor and location overlays
//! - Display coordinator (state snapshot to text lines)
//! - Controller running one main-loop cycle
//! - Alarm configuration persistence

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod overlay;
pub mod persist;
pub mod queue;
pub mod traits;

pub use alarm::{AlarmConfig, AlarmMachine, AlarmState, Button, ButtonEvent};
pub use config::ClockConfig;
pub use controller::{Controller, CycleReport};
pub use error::{Fault, Faults};
pub use queue::{EventQueue, SharedEventQueue, EVENT_QUEUE_CAPACITY};
