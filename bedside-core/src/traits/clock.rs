//! Wall clock source

/// Day of the week, numbered from Sunday like C `tm_wday`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Day number, Sunday = 0
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Three-letter English abbreviation
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

/// Calendar time as read from the clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: Weekday,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClock {
    /// Build a time-of-day on an arbitrary fixed date (handy for tests)
    pub const fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year: 2024,
            month: 1,
            day: 1,
            weekday: Weekday::Monday,
            hour,
            minute,
            second,
        }
    }

    /// Identity of the calendar minute this time falls in
    pub fn minute_stamp(&self) -> MinuteStamp {
        MinuteStamp {
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
        }
    }
}

/// A calendar minute, used to fire an alarm at most once per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MinuteStamp {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

/// Errors from the clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Clock has never been set from a time reference
    NotSynchronized,
    /// Clock hardware returned an invalid value
    Invalid,
}

/// Source of the current wall-clock time
pub trait ClockSource {
    /// Read the current time
    fn now(&mut self) -> Result<WallClock, ClockError>;
}
