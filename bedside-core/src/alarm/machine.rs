//! Alarm state machine
//!
//! The machine owns the alarm configuration and the runtime state. It is
//! driven by two kinds of stimulus: a periodic tick carrying the current
//! wall-clock time (or `None` when the clock is not synchronized) and
//! button presses. Every transition is a pure function of the current
//! machine, the uptime and the stimulus; the caller applies the returned
//! [`Effects`].
//!
//! Timed actions (ring and snooze deadlines) live inside the state
//! variant, so entering a new one replaces the previous deadline.

use super::config::AlarmConfig;
use super::events::Button;
use crate::config::ClockConfig;
use crate::traits::{MinuteStamp, WallClock};

/// Which field the settings edit is changing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditPhase {
    EditingHour,
    EditingMinute,
}

/// In-progress alarm time edit
///
/// Works on a draft; the live config is untouched until commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditSession {
    pub phase: EditPhase,
    pub hour: u8,
    pub minute: u8,
    /// Uptime of the last press that touched this session (ms)
    pub last_activity_ms: u64,
}

impl EditSession {
    fn begin(config: &AlarmConfig, now_ms: u64) -> Self {
        Self {
            phase: EditPhase::EditingHour,
            hour: config.hour,
            minute: config.minute,
            last_activity_ms: now_ms,
        }
    }

    /// Advance the current field by one, wrapping
    fn step(self, now_ms: u64) -> Self {
        let mut next = self;
        match self.phase {
            EditPhase::EditingHour => next.hour = (self.hour + 1) % 24,
            EditPhase::EditingMinute => next.minute = (self.minute + 1) % 60,
        }
        next.last_activity_ms = now_ms;
        next
    }

    fn idle_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }
}

/// Alarm runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Showing the clock, waiting for the alarm minute
    Idle,
    /// User is changing the alarm time
    SettingsEdit(EditSession),
    /// Sounding until the deadline (uptime ms)
    Ringing { until_ms: u64 },
    /// Quiet until the deadline, then rings again
    Snoozed { until_ms: u64 },
}

impl AlarmState {
    pub fn is_ringing(&self) -> bool {
        matches!(self, AlarmState::Ringing { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, AlarmState::SettingsEdit(_))
    }

    /// Deadline of the pending timed action, if any
    pub fn deadline_ms(&self) -> Option<u64> {
        match self {
            AlarmState::Ringing { until_ms } | AlarmState::Snoozed { until_ms } => Some(*until_ms),
            _ => None,
        }
    }
}

/// Something that drives the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stimulus {
    /// Periodic evaluation with the current wall-clock time
    Tick(Option<WallClock>),
    /// A button press or auto-repeat
    Press(Button),
}

/// Side effects requested by a transition
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Effects {
    /// Switch the sounder on or off
    pub audio: Option<bool>,
    /// Store this config
    pub persist: Option<AlarmConfig>,
    /// Visible state changed
    pub redraw: bool,
}

impl Effects {
    pub const NONE: Self = Self {
        audio: None,
        persist: None,
        redraw: false,
    };

    const fn redraw() -> Self {
        Self {
            audio: None,
            persist: None,
            redraw: true,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Alarm state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmMachine {
    config: AlarmConfig,
    state: AlarmState,
    ring_ms: u64,
    snooze_ms: u64,
    edit_idle_ms: u64,
    /// Calendar minute of the last fired alarm
    last_fired: Option<MinuteStamp>,
    clock_synced: bool,
}

impl AlarmMachine {
    /// Create an idle machine with the given alarm and timings
    pub fn new(config: AlarmConfig, timings: &ClockConfig) -> Self {
        Self {
            config,
            state: AlarmState::Idle,
            ring_ms: timings.ring_duration_ms(),
            snooze_ms: timings.snooze_duration_ms(),
            edit_idle_ms: u64::from(timings.edit_idle_timeout_ms),
            last_fired: None,
            clock_synced: false,
        }
    }

    pub fn config(&self) -> AlarmConfig {
        self.config
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Whether the last tick carried a valid wall-clock time
    pub fn clock_synced(&self) -> bool {
        self.clock_synced
    }

    /// Compute the next machine and its effects without mutating `self`
    pub fn transition(self, now_ms: u64, stimulus: Stimulus) -> (Self, Effects) {
        let mut next = self;
        let effects = match stimulus {
            Stimulus::Tick(clock) => next.on_tick(now_ms, clock),
            Stimulus::Press(button) => next.on_press(now_ms, button),
        };
        (next, effects)
    }

    /// Apply a stimulus in place
    pub fn handle(&mut self, now_ms: u64, stimulus: Stimulus) -> Effects {
        let (next, effects) = self.transition(now_ms, stimulus);
        *self = next;
        effects
    }

    fn on_tick(&mut self, now_ms: u64, clock: Option<WallClock>) -> Effects {
        // Comparisons are suspended while the clock is unsynchronized;
        // uptime deadlines keep running.
        self.clock_synced = clock.is_some();

        match self.state {
            AlarmState::Idle => match clock {
                Some(clock) if self.should_fire(&clock) => {
                    self.last_fired = Some(clock.minute_stamp());
                    self.start_ringing(now_ms)
                }
                _ => Effects::NONE,
            },
            AlarmState::Ringing { until_ms } if now_ms >= until_ms => {
                self.state = AlarmState::Idle;
                Effects {
                    audio: Some(false),
                    ..Effects::redraw()
                }
            }
            AlarmState::Snoozed { until_ms } if now_ms >= until_ms => {
                if self.config.armed {
                    self.start_ringing(now_ms)
                } else {
                    self.state = AlarmState::Idle;
                    Effects::redraw()
                }
            }
            AlarmState::SettingsEdit(session) if session.idle_for(now_ms) >= self.edit_idle_ms => {
                self.advance_edit(session, now_ms)
            }
            _ => Effects::NONE,
        }
    }

    fn on_press(&mut self, now_ms: u64, button: Button) -> Effects {
        use AlarmState::*;
        use Button::*;

        match (self.state, button) {
            // Settings edit
            (SettingsEdit(session), AlarmSettings | TriggerAlarm) => {
                self.state = SettingsEdit(session.step(now_ms));
                Effects::redraw()
            }
            (SettingsEdit(session), ControlAlarm) => self.advance_edit(session, now_ms),
            (SettingsEdit(_), MuteAlarm) => {
                self.state = Idle;
                Effects::redraw()
            }

            // Entering the edit; TriggerAlarm works from anywhere
            (Idle, AlarmSettings) | (_, TriggerAlarm) => self.begin_edit(now_ms),

            // Ringing / snoozed
            (Ringing { .. }, RepeatAlarm) => {
                self.state = Snoozed {
                    until_ms: now_ms.saturating_add(self.snooze_ms),
                };
                Effects {
                    audio: Some(false),
                    ..Effects::redraw()
                }
            }
            (Ringing { .. } | Snoozed { .. }, MuteAlarm | ControlAlarm) => self.silence(),

            // Idle
            (Idle, ControlAlarm) => {
                self.config.armed = !self.config.armed;
                Effects {
                    persist: Some(self.config),
                    ..Effects::redraw()
                }
            }

            // Mute while idle and everything else: no change
            _ => Effects::NONE,
        }
    }

    fn should_fire(&self, clock: &WallClock) -> bool {
        self.config.armed
            && self.config.matches(clock)
            && self.last_fired != Some(clock.minute_stamp())
    }

    /// Only called with `config.armed` set
    fn start_ringing(&mut self, now_ms: u64) -> Effects {
        self.state = AlarmState::Ringing {
            until_ms: now_ms.saturating_add(self.ring_ms),
        };
        Effects {
            audio: Some(true),
            ..Effects::redraw()
        }
    }

    fn begin_edit(&mut self, now_ms: u64) -> Effects {
        let audio = self.state.is_ringing().then_some(false);
        self.state = AlarmState::SettingsEdit(EditSession::begin(&self.config, now_ms));
        Effects {
            audio,
            ..Effects::redraw()
        }
    }

    fn advance_edit(&mut self, session: EditSession, now_ms: u64) -> Effects {
        match session.phase {
            EditPhase::EditingHour => {
                self.state = AlarmState::SettingsEdit(EditSession {
                    phase: EditPhase::EditingMinute,
                    last_activity_ms: now_ms,
                    ..session
                });
                Effects::redraw()
            }
            EditPhase::EditingMinute => {
                self.config = AlarmConfig::new(session.hour, session.minute, true);
                self.state = AlarmState::Idle;
                Effects {
                    persist: Some(self.config),
                    ..Effects::redraw()
                }
            }
        }
    }

    /// Stop ringing or snoozing and disarm
    fn silence(&mut self) -> Effects {
        self.state = AlarmState::Idle;
        self.config.armed = false;
        Effects {
            audio: Some(false),
            persist: Some(self.config),
            redraw: true,
        }
    }
}
