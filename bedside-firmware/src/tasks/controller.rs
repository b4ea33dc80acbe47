//! Main loop task
//!
//! Runs one controller cycle per tick and forwards what the cycle asks for
//! to the rest of the firmware.

use bedside_core::{Controller, Faults};
use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::board::Board;
use crate::channels::{EVENTS, SAVE_REQUEST};

/// Main loop period
pub const CYCLE_INTERVAL_MS: u64 = 100;

/// Controller task - the single owner of alarm state
#[embassy_executor::task]
pub async fn controller_task(mut controller: Controller<Board>) {
    info!("Controller task started");

    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_INTERVAL_MS));
    let mut faults = controller.faults();

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis();
        let report = controller.run_cycle(now_ms, &EVENTS);

        if report.dropped > 0 {
            warn!(
                "Dropped {} button events ({} total)",
                report.dropped,
                controller.dropped_events()
            );
        }
        if let Some(on) = report.audio {
            info!("Alarm audio {}", if on { "on" } else { "off" });
        }
        if report.events > 0 {
            debug!("State after {} events: {:?}", report.events, controller.alarm_state());
        }
        if let Some(config) = report.persist {
            SAVE_REQUEST.signal(config);
        }

        let current = controller.faults();
        if current != faults {
            log_fault_changes(faults, current);
            faults = current;
        }
    }
}

fn log_fault_changes(before: Faults, after: Faults) {
    for fault in after.iter().filter(|f| !before.contains(*f)) {
        warn!("Fault raised: {:?}", fault);
    }
    for fault in before.iter().filter(|f| !after.contains(*f)) {
        info!("Fault cleared: {:?}", fault);
    }
}
