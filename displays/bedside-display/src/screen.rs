//! Screen buffer types
//!
//! A character-based screen for the 128x64 OLED with a 6x10 font.

use heapless::String;

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 21;

/// One line of screen text
pub type Line = String<SCREEN_COLS>;

/// Screen buffer for text-mode displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set the content of a specific row
    ///
    /// Text longer than the panel is truncated at a character boundary.
    /// Rows past the bottom are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for ch in text.chars() {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    /// Get the content of a specific row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Check whether any row contains the given text
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.as_str().contains(needle))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
