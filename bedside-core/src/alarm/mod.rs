//! Alarm configuration, button events and the alarm state machine

pub mod config;
pub mod events;
pub mod machine;

pub use config::AlarmConfig;
pub use events::{Button, ButtonEvent};
pub use machine::{AlarmMachine, AlarmState, EditPhase, EditSession, Effects, Stimulus};
