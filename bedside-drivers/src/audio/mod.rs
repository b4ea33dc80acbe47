//! Alarm sounders

pub mod speaker;

pub use speaker::GpioSpeaker;
