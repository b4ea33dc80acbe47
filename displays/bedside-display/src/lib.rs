//! Display abstraction and screen buffer for Bedside
//!
//! This crate provides:
//! - `Screen`, a fixed-size text buffer produced by the display coordinator
//! - `DisplayBackend` trait for panels that can show lines of text
//!
//! The coordinator never talks to hardware. It fills a `Screen`, and the
//! main loop hands that screen to whatever backend the board provides.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{render, DisplayBackend, DisplayError};
pub use screen::{Line, Screen, SCREEN_COLS, SCREEN_ROWS};
