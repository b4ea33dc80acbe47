//! Bedside Hardware Abstraction Layer
//!
//! Traits shared between the board-agnostic alarm logic and the
//! chip-specific firmware. Keeping them in their own crate lets the core
//! logic be tested on the host with in-memory implementations.
//!
//! # Traits
//!
//! - [`flash::FlashStorage`] - Persistent key-value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
