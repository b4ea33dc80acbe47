//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via blocking I2C.
//! The frame buffer is an `embedded-graphics` draw target; text rows are
//! rendered with the 6x10 mono font (21 chars x 6 rows).

use bedside_display::{DisplayBackend, DisplayError, SCREEN_ROWS};
use core::convert::Infallible;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// The 132-column controller RAM is centred on the 128-pixel panel
const COLUMN_OFFSET: u8 = 2;

/// Text cell size for FONT_6X10
const CHAR_WIDTH: i32 = 6;
const ROW_HEIGHT: i32 = 10;

/// Top margin centring six text rows vertically
const TOP_MARGIN: i32 = 2;

/// SH1106 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer, one byte per column per 8-pixel page
    buffer: [[u8; WIDTH]; PAGES],
    initialized: bool,
}

impl<I2C: I2c> Sh1106<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            initialized: false,
        }
    }

    /// Send the power-up sequence and switch the panel on
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }
        self.initialized = true;
        Ok(())
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    /// Check whether a pixel is lit in the frame buffer
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1u8 << (y % 8);
            let byte = &mut self.buffer[y / 8][x];
            match color {
                BinaryColor::On => *byte |= bit,
                BinaryColor::Off => *byte &= !bit,
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Sh1106<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS {
            return Ok(());
        }
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let origin = Point::new(
            i32::from(col) * CHAR_WIDTH,
            TOP_MARGIN + i32::from(row) * ROW_HEIGHT,
        );
        // Drawing into the RAM buffer cannot fail
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(self);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedside_display::{render, Screen};
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    #[derive(Default)]
    struct MockI2c {
        commands: Vec<u8, 128>,
        data_writes: Vec<usize, 16>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, DEFAULT_ADDRESS);
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    match bytes.first() {
                        Some(&CONTROL_COMMAND) => {
                            let _ = self.commands.push(bytes[1]);
                        }
                        Some(&CONTROL_DATA) => {
                            let _ = self.data_writes.push(bytes.len() - 1);
                        }
                        _ => {}
                    }
                }
            }
            Ok(())
        }
    }

    fn lit_in_rows(display: &Sh1106<MockI2c>, rows: core::ops::Range<usize>) -> bool {
        rows.flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .any(|(x, y)| display.is_lit(x, y))
    }

    #[test]
    fn test_init_ends_with_display_on() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        display.init().unwrap();
        let commands = &display.i2c.commands;
        assert_eq!(commands.first(), Some(&cmd::DISPLAY_OFF));
        assert_eq!(commands.last(), Some(&cmd::DISPLAY_ON));
    }

    #[test]
    fn test_flush_requires_init() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        assert_eq!(display.flush(), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_text_lands_in_its_row() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        display.draw_text(1, 0, "07:30").unwrap();

        assert!(lit_in_rows(&display, 12..22));
        assert!(!lit_in_rows(&display, 0..12));
        assert!(!lit_in_rows(&display, 22..HEIGHT));

        DisplayBackend::clear(&mut display).unwrap();
        assert!(!lit_in_rows(&display, 0..HEIGHT));
    }

    #[test]
    fn test_row_out_of_range_ignored() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        display.draw_text(6, 0, "hidden").unwrap();
        assert!(!lit_in_rows(&display, 0..HEIGHT));
    }

    #[test]
    fn test_render_writes_every_page() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        display.init().unwrap();

        let mut screen = Screen::new();
        screen.set_line(0, "*** ALARM ***");
        render(&mut display, &screen).unwrap();

        assert_eq!(display.i2c.data_writes.len(), PAGES);
        assert!(display.i2c.data_writes.iter().all(|&len| len == WIDTH));
        assert!(display
            .i2c
            .commands
            .contains(&(cmd::SET_LOW_COLUMN | COLUMN_OFFSET)));
    }

    #[test]
    fn test_bus_error_reported() {
        let mut display = Sh1106::new(MockI2c::default(), DEFAULT_ADDRESS);
        display.init().unwrap();
        display.i2c.fail = true;
        assert_eq!(display.flush(), Err(DisplayError::Communication));
    }
}
