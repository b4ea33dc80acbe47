//! Main loop controller
//!
//! Owns the alarm machine, the overlay and the board peripherals. Each
//! call to [`Controller::run_cycle`] performs one iteration of the main
//! loop:
//!
//! 1. Read the clock and evaluate the alarm (tick)
//! 2. Apply every queued button event in arrival order
//! 3. Re-sample the climate sensor if its overlay is open and due
//! 4. Redraw if anything visible changed or the periodic refresh is due
//!
//! Nothing here sleeps or waits; timing is elapsed-uptime comparison.

use bedside_display::render;

use crate::alarm::{AlarmConfig, AlarmMachine, AlarmState, Button, ButtonEvent, Effects, Stimulus};
use crate::config::ClockConfig;
use crate::display::{compose, DisplayView};
use crate::error::{Fault, Faults};
use crate::overlay::{Overlay, SensorPanel};
use crate::queue::SharedEventQueue;
use crate::traits::{Peripherals, SensorReading, WallClock};

/// What happened during one cycle, for the caller to act on and log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Config to hand to persistent storage
    pub persist: Option<AlarmConfig>,
    /// Last audio switch made this cycle
    pub audio: Option<bool>,
    /// Number of button events applied
    pub events: u32,
    /// Number of events dropped by the queue since the last cycle
    pub dropped: u32,
    /// A frame was sent to the display
    pub rendered: bool,
}

/// Main loop state and peripherals
pub struct Controller<P> {
    board: P,
    machine: AlarmMachine,
    config: ClockConfig,
    overlay: Overlay,
    clock: Option<WallClock>,
    last_reading: Option<SensorReading>,
    faults: Faults,
    dropped_total: u32,
    needs_redraw: bool,
    last_render_ms: Option<u64>,
}

impl<P: Peripherals> Controller<P> {
    /// Create a controller with the alarm restored from storage
    ///
    /// Switches the sounder off so the board starts silent.
    pub fn new(mut board: P, alarm: AlarmConfig, config: ClockConfig) -> Self {
        board.set_audio(false);
        Self {
            board,
            machine: AlarmMachine::new(alarm, &config),
            config,
            overlay: Overlay::None,
            clock: None,
            last_reading: None,
            faults: Faults::empty(),
            dropped_total: 0,
            needs_redraw: true,
            last_render_ms: None,
        }
    }

    /// Run one main-loop iteration, draining the shared queue
    pub fn run_cycle<const N: usize>(
        &mut self,
        now_ms: u64,
        queue: &SharedEventQueue<N>,
    ) -> CycleReport {
        let dropped = queue.take_dropped();
        self.step(now_ms, queue.drain_all(), dropped)
    }

    /// Run one main-loop iteration over already-drained events
    pub fn step<I>(&mut self, now_ms: u64, events: I, dropped: u32) -> CycleReport
    where
        I: IntoIterator<Item = ButtonEvent>,
    {
        let mut report = CycleReport {
            dropped,
            ..CycleReport::default()
        };
        self.faults.set(Fault::QueueOverflow, dropped > 0);
        self.dropped_total = self.dropped_total.saturating_add(dropped);

        // Clock first, so a mute queued in the same cycle as the alarm
        // minute silences it before the cycle ends
        self.clock = self.board.now().ok();
        self.faults.set(Fault::ClockUnsynchronized, self.clock.is_none());
        let effects = self.machine.handle(now_ms, Stimulus::Tick(self.clock));
        self.apply(effects, &mut report);

        for event in events {
            report.events += 1;
            self.on_button(now_ms, event.button, &mut report);
        }

        if let Overlay::Sensor(panel) = &self.overlay {
            if panel.sample_due(now_ms) {
                self.sample_sensor(now_ms);
            }
        }

        let refresh_due = match self.last_render_ms {
            Some(at) => now_ms.saturating_sub(at) >= u64::from(self.config.display_refresh_ms),
            None => true,
        };
        if refresh_due && !self.machine.state().is_editing() {
            self.needs_redraw = true;
        }
        if self.needs_redraw {
            report.rendered = self.redraw(now_ms);
        }

        report
    }

    fn on_button(&mut self, now_ms: u64, button: Button, report: &mut CycleReport) {
        if self.overlay.is_open() {
            self.overlay = Overlay::None;
            self.needs_redraw = true;
            // Alarm buttons still act on the alarm
            if !button.is_alarm_control() {
                return;
            }
        } else {
            let state = self.machine.state();
            let overlay_allowed = matches!(state, AlarmState::Idle | AlarmState::Snoozed { .. });
            match button {
                Button::TriggerSensor if overlay_allowed => {
                    self.overlay = Overlay::Sensor(SensorPanel::open(self.last_reading, now_ms));
                    self.sample_sensor(now_ms);
                    return;
                }
                Button::Time if state == AlarmState::Idle => {
                    let result = self.board.fetch_location();
                    self.faults.set(Fault::LookupFailed, result.is_err());
                    self.overlay = Overlay::Location(result);
                    self.needs_redraw = true;
                    return;
                }
                Button::Time => {
                    self.needs_redraw = true;
                    return;
                }
                _ => {}
            }
        }

        let effects = self.machine.handle(now_ms, Stimulus::Press(button));
        self.apply(effects, report);
    }

    fn apply(&mut self, effects: Effects, report: &mut CycleReport) {
        if let Some(on) = effects.audio {
            self.board.set_audio(on);
            report.audio = Some(on);
            if on {
                self.overlay = Overlay::None;
            }
        }
        if let Some(config) = effects.persist {
            report.persist = Some(config);
        }
        if effects.redraw {
            self.needs_redraw = true;
        }
    }

    fn sample_sensor(&mut self, now_ms: u64) {
        let sample = self
            .board
            .read_climate()
            .and_then(|(t, h)| SensorReading::checked(t, h, now_ms));
        self.faults.set(Fault::SensorUnavailable, sample.is_err());
        if let Ok(reading) = sample {
            self.last_reading = Some(reading);
        }
        if let Overlay::Sensor(panel) = &mut self.overlay {
            panel.record(sample, now_ms, u64::from(self.config.sensor_refresh_ms));
        }
        self.needs_redraw = true;
    }

    /// Compose and send a frame; on failure the redraw is retried next cycle
    fn redraw(&mut self, now_ms: u64) -> bool {
        let screen = compose(&DisplayView {
            state: self.machine.state(),
            config: self.machine.config(),
            clock: self.clock,
            now_ms,
            overlay: &self.overlay,
        });
        match render(&mut self.board, &screen) {
            Ok(()) => {
                self.needs_redraw = false;
                self.last_render_ms = Some(now_ms);
                true
            }
            Err(_) => false,
        }
    }

    pub fn alarm_config(&self) -> AlarmConfig {
        self.machine.config()
    }

    pub fn alarm_state(&self) -> AlarmState {
        self.machine.state()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Currently active fault conditions
    pub fn faults(&self) -> Faults {
        self.faults
    }

    /// Total events dropped by the queue since startup
    pub fn dropped_events(&self) -> u32 {
        self.dropped_total
    }

    pub fn last_reading(&self) -> Option<SensorReading> {
        self.last_reading
    }

    pub fn board(&self) -> &P {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut P {
        &mut self.board
    }
}
