//! Display backend trait
//!
//! Defines the interface between the screen buffer and a physical panel.

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Implementations must complete every call in bounded time; the main loop
/// calls them synchronously between event drains.
pub trait DisplayBackend {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column (character units)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Send buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Render a whole screen: clear, draw every non-empty row, flush
pub fn render<D: DisplayBackend>(display: &mut D, screen: &Screen) -> Result<(), DisplayError> {
    display.clear()?;
    for (row, text) in screen.lines().enumerate() {
        if !text.is_empty() {
            display.draw_text(row as u8, 0, text)?;
        }
    }
    display.flush()
}
