//! GPIO speaker output
//!
//! Switches an amplifier enable or an active buzzer through one pin.

use bedside_core::traits::AudioOutput;
use embedded_hal::digital::OutputPin;

/// Speaker behind a GPIO enable line
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioSpeaker<P> {
    pin: P,
    /// If true, sound ON = pin LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> GpioSpeaker<P> {
    /// Create a speaker output, starting silent
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut speaker = Self {
            pin,
            inverted,
            on: false,
        };
        speaker.set_audio(false);
        speaker
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> AudioOutput for GpioSpeaker<P> {
    fn set_audio(&mut self, on: bool) {
        self.on = on;
        // GPIO writes on the supported boards are infallible
        let _ = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }

    fn is_audio_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_speaker() {
        let mut speaker = GpioSpeaker::new_active_high(MockPin { high: true });
        assert!(!speaker.is_audio_on());
        assert!(!speaker.pin.high);

        speaker.set_audio(true);
        assert!(speaker.is_audio_on());
        assert!(speaker.pin.high);

        speaker.set_audio(false);
        assert!(!speaker.pin.high);
    }

    #[test]
    fn test_active_low_speaker() {
        let mut speaker = GpioSpeaker::new_active_low(MockPin { high: false });
        // Silent means pin high for active-low
        assert!(speaker.pin.high);

        speaker.set_audio(true);
        assert!(!speaker.pin.high);
        assert!(speaker.is_audio_on());
    }
}
