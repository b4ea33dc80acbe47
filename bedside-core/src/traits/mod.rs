//! Collaborator traits
//!
//! These traits define the interface between the alarm logic and the
//! board. Every call is synchronous and must complete in bounded time.

pub mod audio;
pub mod clock;
pub mod location;
pub mod sensor;

pub use audio::AudioOutput;
pub use clock::{ClockError, ClockSource, MinuteStamp, WallClock, Weekday};
pub use location::{LocationData, LocationProvider, LookupError, NoLocationService};
pub use sensor::{EnvironmentSensor, SensorError, SensorReading};

use bedside_display::DisplayBackend;

/// Everything the controller needs from a board
///
/// Implemented automatically for any type providing all collaborator
/// traits, so a board struct only implements the pieces.
pub trait Peripherals:
    ClockSource + AudioOutput + EnvironmentSensor + LocationProvider + DisplayBackend
{
}

impl<T> Peripherals for T where
    T: ClockSource + AudioOutput + EnvironmentSensor + LocationProvider + DisplayBackend
{
}
