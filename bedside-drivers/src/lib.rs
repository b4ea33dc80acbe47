//! Peripheral drivers for Bedside
//!
//! Implementations of the `bedside-core` collaborator traits on top of
//! `embedded-hal` pins, delays and buses:
//!
//! - DHT22 temperature/humidity sensor
//! - GPIO speaker / buzzer enable
//! - SH1106 128x64 OLED text panel

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod display;
pub mod sensor;
