//! Climate sensors

pub mod dht22;

pub use dht22::{DataPin, Dht22};
