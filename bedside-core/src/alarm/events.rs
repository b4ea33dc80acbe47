//! Logical buttons and the events they produce

/// The seven physical buttons, by function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Show the clock; on the clock view, request a location lookup
    Time,
    /// Jump straight into alarm settings from any state
    TriggerAlarm,
    /// Enter alarm settings, then step the field being edited
    AlarmSettings,
    /// Snooze a ringing alarm
    RepeatAlarm,
    /// Silence and disarm
    MuteAlarm,
    /// Show temperature and humidity
    TriggerSensor,
    /// Arm/disarm toggle, silence, and "next" while editing
    ControlAlarm,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Time,
        Button::TriggerAlarm,
        Button::AlarmSettings,
        Button::RepeatAlarm,
        Button::MuteAlarm,
        Button::TriggerSensor,
        Button::ControlAlarm,
    ];

    /// Buttons that must always reach the alarm state machine
    pub fn is_alarm_control(self) -> bool {
        !matches!(self, Button::Time | Button::TriggerSensor)
    }

    /// Buttons that step the field being edited
    pub fn is_settings(self) -> bool {
        matches!(self, Button::AlarmSettings | Button::TriggerAlarm)
    }
}

/// A button press (or auto-repeat while held) with its uptime stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub at_ms: u64,
}

impl ButtonEvent {
    pub const fn new(button: Button, at_ms: u64) -> Self {
        Self { button, at_ms }
    }
}
