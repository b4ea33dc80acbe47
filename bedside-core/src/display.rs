//! Display coordinator
//!
//! Pure mapping from a snapshot of the clock's state to the text lines on
//! the panel. Never blocks and never talks to hardware; the controller
//! hands the result to a `DisplayBackend`.

use core::fmt::{self, Write};

use bedside_display::Screen;
use heapless::String;

use crate::alarm::{AlarmConfig, AlarmState, EditPhase, EditSession};
use crate::overlay::{Overlay, SensorPanel};
use crate::traits::{LocationData, LookupError, WallClock};

/// Everything the coordinator needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct DisplayView<'a> {
    pub state: AlarmState,
    pub config: AlarmConfig,
    /// `None` when the clock is not synchronized
    pub clock: Option<WallClock>,
    /// Uptime, for countdowns (ms)
    pub now_ms: u64,
    pub overlay: &'a Overlay,
}

/// Build the screen for a view
///
/// Ringing and settings edit take precedence over overlays.
pub fn compose(view: &DisplayView<'_>) -> Screen {
    let mut screen = Screen::new();
    match (view.state, view.overlay) {
        (AlarmState::Ringing { .. }, _) => ringing_view(&mut screen, view),
        (AlarmState::SettingsEdit(session), _) => settings_view(&mut screen, &session),
        (_, Overlay::Sensor(panel)) => sensor_view(&mut screen, panel),
        (_, Overlay::Location(result)) => location_view(&mut screen, result),
        (AlarmState::Snoozed { until_ms }, Overlay::None) => {
            snoozed_view(&mut screen, view, until_ms)
        }
        (AlarmState::Idle, Overlay::None) => clock_view(&mut screen, view),
    }
    screen
}

fn put(screen: &mut Screen, row: usize, args: fmt::Arguments<'_>) {
    let mut buf: String<32> = String::new();
    // Overlong text is cut by the screen anyway
    let _ = buf.write_fmt(args);
    screen.set_line(row, &buf);
}

fn alarm_line(screen: &mut Screen, row: usize, config: &AlarmConfig) {
    let label = if config.armed { "ON " } else { "OFF" };
    put(
        screen,
        row,
        format_args!("Alarm {} {:02}:{:02}", label, config.hour, config.minute),
    );
}

fn clock_view(screen: &mut Screen, view: &DisplayView<'_>) {
    match view.clock {
        Some(clock) => {
            // DD-W-MM, weekday numbered from Sunday
            put(
                screen,
                0,
                format_args!(
                    "{:02}-{}-{:02}  {}",
                    clock.day,
                    clock.weekday.number(),
                    clock.month,
                    clock.weekday.short_name()
                ),
            );
            put(
                screen,
                2,
                format_args!("{:02}:{:02}:{:02}", clock.hour, clock.minute, clock.second),
            );
        }
        None => {
            screen.set_line(0, "CLOCK NOT SET");
            screen.set_line(2, "--:--");
        }
    }
    alarm_line(screen, 4, &view.config);
}

fn settings_view(screen: &mut Screen, session: &EditSession) {
    screen.set_line(0, "Set time for Alarm");
    put(
        screen,
        2,
        format_args!("  {:02}:{:02}", session.hour, session.minute),
    );
    let caret = match session.phase {
        EditPhase::EditingHour => "  ^^",
        EditPhase::EditingMinute => "     ^^",
    };
    screen.set_line(3, caret);
    screen.set_line(5, "SET +1   CTRL next");
}

fn ringing_view(screen: &mut Screen, view: &DisplayView<'_>) {
    screen.set_line(0, "*** ALARM ***");
    put(
        screen,
        2,
        format_args!("{:02}:{:02}", view.config.hour, view.config.minute),
    );
    screen.set_line(4, "REPEAT: snooze");
    screen.set_line(5, "MUTE: stop");
}

fn snoozed_view(screen: &mut Screen, view: &DisplayView<'_>, until_ms: u64) {
    let remaining_s = until_ms.saturating_sub(view.now_ms).div_ceil(1000);
    screen.set_line(0, "Snoozed");
    put(
        screen,
        2,
        format_args!("Ring in {:02}:{:02}", remaining_s / 60, remaining_s % 60),
    );
    alarm_line(screen, 4, &view.config);
}

fn sensor_view(screen: &mut Screen, panel: &SensorPanel) {
    screen.set_line(0, "Climate");
    match panel.reading {
        Some(reading) => {
            put(screen, 2, format_args!("T: {:.1}C", reading.temperature_c));
            put(screen, 3, format_args!("H: {:.1}%", reading.humidity_pct));
        }
        None => {
            screen.set_line(2, "T: --.-C");
            screen.set_line(3, "H: --.-%");
        }
    }
    if panel.stale {
        screen.set_line(5, "(sensor stale)");
    }
}

fn location_view(screen: &mut Screen, result: &Result<LocationData, LookupError>) {
    screen.set_line(0, "Location");
    match result {
        Ok(location) => {
            put(screen, 1, format_args!("UNIX: {}", location.unix_time));
            put(screen, 2, format_args!("Lat: {:.4}", location.latitude));
            put(screen, 3, format_args!("Lon: {:.4}", location.longitude));
            screen.set_line(4, &location.city);
        }
        Err(_) => {
            screen.set_line(2, "Location failed");
            screen.set_line(4, "TIME to retry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SensorReading, Weekday};

    fn view<'a>(state: AlarmState, overlay: &'a Overlay) -> DisplayView<'a> {
        DisplayView {
            state,
            config: AlarmConfig::new(7, 30, true),
            clock: Some(WallClock {
                year: 2026,
                month: 10,
                day: 19,
                weekday: Weekday::Monday,
                hour: 6,
                minute: 5,
                second: 9,
            }),
            now_ms: 0,
            overlay,
        }
    }

    #[test]
    fn test_clock_view() {
        let screen = compose(&view(AlarmState::Idle, &Overlay::None));
        assert_eq!(screen.line(0), Some("19-1-10  Mon"));
        assert_eq!(screen.line(2), Some("06:05:09"));
        assert_eq!(screen.line(4), Some("Alarm ON  07:30"));
    }

    #[test]
    fn test_disarmed_alarm_line() {
        let mut v = view(AlarmState::Idle, &Overlay::None);
        v.config = AlarmConfig::new(7, 30, false);
        assert_eq!(compose(&v).line(4), Some("Alarm OFF 07:30"));
    }

    #[test]
    fn test_unsynchronized_clock() {
        let mut v = view(AlarmState::Idle, &Overlay::None);
        v.clock = None;
        let screen = compose(&v);
        assert_eq!(screen.line(0), Some("CLOCK NOT SET"));
        assert_eq!(screen.line(2), Some("--:--"));
    }

    #[test]
    fn test_settings_caret_follows_phase() {
        let mut session = EditSession {
            phase: EditPhase::EditingHour,
            hour: 6,
            minute: 45,
            last_activity_ms: 0,
        };
        let screen = compose(&view(AlarmState::SettingsEdit(session), &Overlay::None));
        assert_eq!(screen.line(2), Some("  06:45"));
        assert_eq!(screen.line(3), Some("  ^^"));

        session.phase = EditPhase::EditingMinute;
        let screen = compose(&view(AlarmState::SettingsEdit(session), &Overlay::None));
        assert_eq!(screen.line(3), Some("     ^^"));
    }

    #[test]
    fn test_snoozed_countdown() {
        let mut v = view(AlarmState::Snoozed { until_ms: 300_000 }, &Overlay::None);
        v.now_ms = 1_500;
        assert_eq!(compose(&v).line(2), Some("Ring in 04:59"));
    }

    #[test]
    fn test_sensor_overlay() {
        let overlay = Overlay::Sensor(SensorPanel {
            reading: Some(SensorReading {
                temperature_c: 21.5,
                humidity_pct: 40.0,
                sampled_at_ms: 0,
            }),
            stale: true,
            next_sample_ms: 2_000,
        });
        let screen = compose(&view(AlarmState::Idle, &overlay));
        assert_eq!(screen.line(2), Some("T: 21.5C"));
        assert_eq!(screen.line(3), Some("H: 40.0%"));
        assert!(screen.contains("stale"));
    }

    #[test]
    fn test_sensor_overlay_without_reading() {
        let overlay = Overlay::Sensor(SensorPanel::open(None, 0));
        let screen = compose(&view(AlarmState::Idle, &overlay));
        assert_eq!(screen.line(2), Some("T: --.-C"));
        assert!(!screen.contains("stale"));
    }

    #[test]
    fn test_location_overlay() {
        let mut city = String::new();
        let _ = city.push_str("Berlin");
        let overlay = Overlay::Location(Ok(LocationData {
            unix_time: 1_760_000_000,
            latitude: 52.52,
            longitude: 13.405,
            city,
        }));
        let screen = compose(&view(AlarmState::Idle, &overlay));
        assert_eq!(screen.line(1), Some("UNIX: 1760000000"));
        assert_eq!(screen.line(2), Some("Lat: 52.5200"));
        assert_eq!(screen.line(3), Some("Lon: 13.4050"));
        assert_eq!(screen.line(4), Some("Berlin"));
    }

    #[test]
    fn test_location_failure_line() {
        let overlay = Overlay::Location(Err(LookupError::RequestFailed));
        let screen = compose(&view(AlarmState::Idle, &overlay));
        assert!(screen.contains("Location failed"));
    }

    #[test]
    fn test_ringing_hides_overlay() {
        let overlay = Overlay::Sensor(SensorPanel::open(None, 0));
        let screen = compose(&view(AlarmState::Ringing { until_ms: 1 }, &overlay));
        assert_eq!(screen.line(0), Some("*** ALARM ***"));
        assert!(!screen.contains("Climate"));
    }
}
