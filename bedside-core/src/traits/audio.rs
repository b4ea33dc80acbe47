//! Audio output trait

/// Alarm sounder (buzzer, speaker amplifier enable, ...)
pub trait AudioOutput {
    /// Switch the alarm sound on or off
    fn set_audio(&mut self, on: bool);

    /// Check if the sound is currently on
    fn is_audio_on(&self) -> bool;
}
