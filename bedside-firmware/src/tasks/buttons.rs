//! Button input tasks
//!
//! One task per button. A debounced press becomes a single
//! [`ButtonEvent`] in the shared queue. Holding a settings button repeats
//! the press so hour and minute can be scrolled quickly.

use bedside_core::{Button, ButtonEvent};
use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use crate::channels::EVENTS;

/// Contact bounce settle time
const DEBOUNCE_MS: u64 = 80;

/// Hold time before a settings button starts repeating
const REPEAT_DELAY_MS: u64 = 1000;

/// Interval between repeated presses while held
const REPEAT_INTERVAL_MS: u64 = 150;

/// Button task - turns falling edges into queued events
#[embassy_executor::task(pool_size = 7)]
pub async fn button_task(mut input: Input<'static>, button: Button) {
    info!("Button task started: {:?}", button);

    loop {
        input.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if input.is_high() {
            continue;
        }

        press(button);

        if button.is_settings() {
            let released =
                with_timeout(Duration::from_millis(REPEAT_DELAY_MS), input.wait_for_high()).await;
            if released.is_err() {
                debug!("{:?} held, repeating", button);
                while input.is_low() {
                    press(button);
                    Timer::after(Duration::from_millis(REPEAT_INTERVAL_MS)).await;
                }
            }
        } else {
            input.wait_for_high().await;
        }
    }
}

fn press(button: Button) {
    let event = ButtonEvent::new(button, Instant::now().as_millis());
    if let Some(evicted) = EVENTS.enqueue(event) {
        debug!("Event queue full, dropped {:?}", evicted.button);
    }
}
