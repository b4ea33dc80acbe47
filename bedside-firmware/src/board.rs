//! Board wiring
//!
//! The `Board` type bundles every peripheral the controller talks to.
//!
//! Pico pin assignments:
//!
//! | GPIO | Function                          |
//! |------|-----------------------------------|
//! | 2    | Time button                       |
//! | 3    | Trigger-alarm button              |
//! | 4    | Alarm-settings button             |
//! | 5    | Repeat (snooze) button            |
//! | 6    | Mute button                       |
//! | 7    | Sensor button                     |
//! | 8    | Control (arm / next) button       |
//! | 15   | Speaker amplifier enable          |
//! | 16   | DHT22 data                        |
//! | 20   | OLED SDA (I2C0)                   |
//! | 21   | OLED SCL (I2C0)                   |
//!
//! Buttons are active low with the internal pull-up.

use bedside_core::traits::{
    AudioOutput, ClockError, ClockSource, EnvironmentSensor, LocationData, LocationProvider,
    LookupError, NoLocationService, SensorError, WallClock, Weekday,
};
use bedside_display::{DisplayBackend, DisplayError};
use bedside_drivers::audio::GpioSpeaker;
use bedside_drivers::display::Sh1106;
use bedside_drivers::sensor::{DataPin, Dht22};
use embassy_rp::gpio::{Flex, Output, Pull};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, RTC};
use embassy_rp::rtc::{DayOfWeek, Rtc};
use embassy_time::Delay;

/// OLED bus speed
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Concrete peripheral types on this board
pub type Speaker = GpioSpeaker<Output<'static>>;
pub type ClimateSensor = Dht22<DhtLine<'static>, Delay>;
pub type Panel = Sh1106<I2c<'static, I2C0, Blocking>>;

/// DHT22 data line on a flex pin with the internal pull-up
pub struct DhtLine<'d> {
    pin: Flex<'d>,
}

impl<'d> DhtLine<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }
}

impl DataPin for DhtLine<'_> {
    fn drive_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}

/// Real-time clock as the wall-clock source
///
/// The RTC does not run until something sets it, so a fresh boot reports
/// the clock as unsynchronized.
pub struct RtcClock {
    rtc: Rtc<'static, RTC>,
}

impl RtcClock {
    pub fn new(rtc: Rtc<'static, RTC>) -> Self {
        Self { rtc }
    }
}

impl ClockSource for RtcClock {
    fn now(&mut self) -> Result<WallClock, ClockError> {
        if !self.rtc.is_running() {
            return Err(ClockError::NotSynchronized);
        }
        let dt = self.rtc.now().map_err(|_| ClockError::Invalid)?;
        Ok(WallClock {
            year: dt.year,
            month: dt.month,
            day: dt.day,
            weekday: weekday(dt.day_of_week),
            hour: dt.hour,
            minute: dt.minute,
            second: dt.second,
        })
    }
}

fn weekday(day: DayOfWeek) -> Weekday {
    match day {
        DayOfWeek::Sunday => Weekday::Sunday,
        DayOfWeek::Monday => Weekday::Monday,
        DayOfWeek::Tuesday => Weekday::Tuesday,
        DayOfWeek::Wednesday => Weekday::Wednesday,
        DayOfWeek::Thursday => Weekday::Thursday,
        DayOfWeek::Friday => Weekday::Friday,
        DayOfWeek::Saturday => Weekday::Saturday,
    }
}

/// Every peripheral the controller uses
pub struct Board {
    pub clock: RtcClock,
    pub speaker: Speaker,
    pub sensor: ClimateSensor,
    pub location: NoLocationService,
    pub panel: Panel,
}

impl ClockSource for Board {
    fn now(&mut self) -> Result<WallClock, ClockError> {
        self.clock.now()
    }
}

impl AudioOutput for Board {
    fn set_audio(&mut self, on: bool) {
        self.speaker.set_audio(on);
    }

    fn is_audio_on(&self) -> bool {
        self.speaker.is_audio_on()
    }
}

impl EnvironmentSensor for Board {
    fn read_climate(&mut self) -> Result<(f32, f32), SensorError> {
        // Bit timing is measured by polling; keep interrupts out of it
        critical_section::with(|_| self.sensor.read_climate())
    }
}

impl LocationProvider for Board {
    fn fetch_location(&mut self) -> Result<LocationData, LookupError> {
        self.location.fetch_location()
    }
}

impl DisplayBackend for Board {
    fn clear(&mut self) -> Result<(), DisplayError> {
        DisplayBackend::clear(&mut self.panel)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.panel.draw_text(row, col, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.panel.flush()
    }
}
