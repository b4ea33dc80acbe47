//! Temperature and humidity sensor trait

/// Errors that can occur with climate sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer the start signal
    NoResponse,
    /// A bit or the response took longer than the protocol allows
    Timeout,
    /// Frame checksum did not match
    Checksum,
    /// Reading outside the sensor's physical range
    OutOfRange,
}

/// One climate sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
    /// Uptime at which the sample was taken (ms)
    pub sampled_at_ms: u64,
}

impl SensorReading {
    /// Lowest temperature the sensor can report (°C)
    pub const MIN_TEMPERATURE_C: f32 = -40.0;
    /// Highest temperature the sensor can report (°C)
    pub const MAX_TEMPERATURE_C: f32 = 80.0;

    /// Validate a raw sample against the sensor's physical range
    pub fn checked(
        temperature_c: f32,
        humidity_pct: f32,
        sampled_at_ms: u64,
    ) -> Result<Self, SensorError> {
        let temp_ok = (Self::MIN_TEMPERATURE_C..=Self::MAX_TEMPERATURE_C).contains(&temperature_c);
        let humidity_ok = (0.0..=100.0).contains(&humidity_pct);
        if !temp_ok || !humidity_ok {
            return Err(SensorError::OutOfRange);
        }
        Ok(Self {
            temperature_c,
            humidity_pct,
            sampled_at_ms,
        })
    }
}

/// Trait for temperature/humidity sensors
///
/// Takes `&mut self` because sampling drives the data line.
pub trait EnvironmentSensor {
    /// Sample the sensor, returning (temperature °C, relative humidity %)
    fn read_climate(&mut self) -> Result<(f32, f32), SensorError>;
}
