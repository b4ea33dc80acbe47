//! DHT22 (AM2302) temperature/humidity sensor
//!
//! Single-wire protocol: the host pulls the line low for at least 1 ms,
//! releases it, and the sensor answers with an 80 µs low / 80 µs high
//! preamble followed by 40 data bits. Each bit is a ~50 µs low followed by
//! a high pulse of ~27 µs (0) or ~70 µs (1). The frame is
//! humidity (16 bit), temperature (sign + 15 bit), checksum.
//!
//! Pulse widths are measured by polling with 1 µs delays, so the read
//! must not be preempted for its ~5 ms duration.

use bedside_core::traits::{EnvironmentSensor, SensorError};
use embedded_hal::delay::DelayNs;

/// Host start pulse length (ms)
const START_LOW_MS: u32 = 2;

/// Longest wait for any preamble edge (µs)
const PREAMBLE_TIMEOUT_US: u32 = 100;

/// Longest wait for any bit edge (µs)
const BIT_TIMEOUT_US: u32 = 100;

/// High pulses longer than this are a 1 bit (µs)
const ONE_THRESHOLD_US: u32 = 40;

/// Open-drain data line
///
/// The line has a pull-up; the host either drives it low or releases it.
pub trait DataPin {
    /// Actively drive the line low
    fn drive_low(&mut self);

    /// Stop driving and let the pull-up (or the sensor) set the level
    fn release(&mut self);

    /// Sample the line level
    fn is_high(&mut self) -> bool;
}

/// DHT22 driver
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
}

impl<P: DataPin, D: DelayNs> Dht22<P, D> {
    /// Create a driver; the line is released so the sensor can idle
    pub fn new(mut pin: P, delay: D) -> Self {
        pin.release();
        Self { pin, delay }
    }

    /// Read one raw 5-byte frame
    pub fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.drive_low();
        self.delay.delay_ms(START_LOW_MS);
        self.pin.release();

        // Preamble: pull-up high, sensor low 80 µs, sensor high 80 µs
        let no_response = |_| SensorError::NoResponse;
        self.wait_while(true, PREAMBLE_TIMEOUT_US).map_err(no_response)?;
        self.wait_while(false, PREAMBLE_TIMEOUT_US).map_err(no_response)?;
        self.wait_while(true, PREAMBLE_TIMEOUT_US).map_err(no_response)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(false, BIT_TIMEOUT_US)?;
            let high_us = self.wait_while(true, BIT_TIMEOUT_US)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Wait while the line stays at `level`, returning the time spent (µs)
    fn wait_while(&mut self, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high() == level {
            if elapsed >= timeout_us {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }

    /// Give back the pin and delay
    pub fn into_parts(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

/// Decode a frame into (temperature °C, relative humidity %)
pub fn decode(frame: [u8; 5]) -> Result<(f32, f32), SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
    let temperature = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };
    Ok((temperature, humidity))
}

impl<P: DataPin, D: DelayNs> EnvironmentSensor for Dht22<P, D> {
    fn read_climate(&mut self) -> Result<(f32, f32), SensorError> {
        let frame = self.read_frame()?;
        decode(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use heapless::Vec;

    #[test]
    fn test_decode_positive() {
        // 65.2 %RH, 35.1 °C
        let (t, h) = decode([0x02, 0x8C, 0x01, 0x5F, 0xEE]).unwrap();
        assert!((t - 35.1).abs() < 0.01);
        assert!((h - 65.2).abs() < 0.01);
    }

    #[test]
    fn test_decode_negative_temperature() {
        let (t, _) = decode([0x02, 0x8C, 0x80, 0x65, 0x73]).unwrap();
        assert!((t + 10.1).abs() < 0.01);
    }

    #[test]
    fn test_decode_bad_checksum() {
        assert_eq!(
            decode([0x02, 0x8C, 0x01, 0x5F, 0xEF]),
            Err(SensorError::Checksum)
        );
    }

    /// Simulated line: a waveform that starts when the host releases it
    struct Line<'a> {
        now_ns: &'a Cell<u64>,
        driven_low: bool,
        released_at_ns: Option<u64>,
        /// (level, duration µs) segments after release
        waveform: Vec<(bool, u32), 96>,
    }

    impl DataPin for Line<'_> {
        fn drive_low(&mut self) {
            self.driven_low = true;
        }

        fn release(&mut self) {
            if self.driven_low {
                self.released_at_ns = Some(self.now_ns.get());
            }
            self.driven_low = false;
        }

        fn is_high(&mut self) -> bool {
            if self.driven_low {
                return false;
            }
            let Some(start) = self.released_at_ns else {
                return true;
            };
            let mut offset_us = (self.now_ns.get() - start) / 1000;
            for (level, duration) in &self.waveform {
                if offset_us < u64::from(*duration) {
                    return *level;
                }
                offset_us -= u64::from(*duration);
            }
            true
        }
    }

    struct Clock<'a> {
        now_ns: &'a Cell<u64>,
    }

    impl DelayNs for Clock<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.now_ns.set(self.now_ns.get() + u64::from(ns));
        }
    }

    fn waveform(frame: [u8; 5]) -> Vec<(bool, u32), 96> {
        let mut w = Vec::new();
        let _ = w.push((true, 30));
        let _ = w.push((false, 80));
        let _ = w.push((true, 80));
        for bit in 0..40 {
            let one = frame[bit / 8] & (0x80 >> (bit % 8)) != 0;
            let _ = w.push((false, 50));
            let _ = w.push((true, if one { 70 } else { 26 }));
        }
        let _ = w.push((false, 50));
        w
    }

    #[test]
    fn test_read_frame_from_waveform() {
        let now = Cell::new(0);
        let frame = [0x02, 0x8C, 0x01, 0x5F, 0xEE];
        let line = Line {
            now_ns: &now,
            driven_low: false,
            released_at_ns: None,
            waveform: waveform(frame),
        };
        let mut sensor = Dht22::new(line, Clock { now_ns: &now });

        assert_eq!(sensor.read_frame(), Ok(frame));
        let (t, h) = decode(frame).unwrap();
        assert_eq!(sensor.read_climate(), Ok((t, h)));
    }

    #[test]
    fn test_no_response() {
        let now = Cell::new(0);
        let line = Line {
            now_ns: &now,
            driven_low: false,
            released_at_ns: None,
            waveform: Vec::new(),
        };
        let mut sensor = Dht22::new(line, Clock { now_ns: &now });
        assert_eq!(sensor.read_climate(), Err(SensorError::NoResponse));
    }
}
