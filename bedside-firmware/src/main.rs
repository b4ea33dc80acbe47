//! Bedside - Alarm Clock Firmware
//!
//! Main firmware binary for the Pico-based bedside alarm clock.
//! Buttons feed a bounded event queue, a single controller task runs the
//! alarm state machine and the OLED, and alarm changes are written to
//! flash in the background.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::rtc::Rtc;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use bedside_core::persist::AlarmStore;
use bedside_core::traits::NoLocationService;
use bedside_core::{Button, ClockConfig, Controller};
use bedside_drivers::audio::GpioSpeaker;
use bedside_drivers::display::sh1106::{Sh1106, DEFAULT_ADDRESS};
use bedside_drivers::sensor::Dht22;

use crate::board::{Board, DhtLine, RtcClock, I2C_FREQUENCY_HZ};
use crate::storage::RpFlashStorage;

mod board;
mod channels;
mod storage;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bedside firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = ClockConfig::default();

    // Restore the alarm from flash (or fall back to the default)
    let mut store = AlarmStore::new(RpFlashStorage::new(p.FLASH, p.DMA_CH0));
    let (alarm, load_error) = store.load_or(config.default_alarm).await;
    match load_error {
        None => info!("Loaded alarm from flash: {:?}", alarm),
        Some(e) => info!("No valid alarm in flash ({:?}), using default", e),
    }

    // Clock stays unsynchronized until something sets the RTC
    let clock = RtcClock::new(Rtc::new(p.RTC));

    let speaker = GpioSpeaker::new_active_high(Output::new(p.PIN_15, Level::Low));
    let sensor = Dht22::new(DhtLine::new(Flex::new(p.PIN_16)), Delay);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c_config);

    let mut panel = Sh1106::new(i2c, DEFAULT_ADDRESS);
    match panel.init() {
        Ok(()) => info!("OLED initialized"),
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    let board = Board {
        clock,
        speaker,
        sensor,
        location: NoLocationService,
        panel,
    };
    let controller = Controller::new(board, alarm, config);

    let buttons = [
        (Input::new(p.PIN_2, Pull::Up), Button::Time),
        (Input::new(p.PIN_3, Pull::Up), Button::TriggerAlarm),
        (Input::new(p.PIN_4, Pull::Up), Button::AlarmSettings),
        (Input::new(p.PIN_5, Pull::Up), Button::RepeatAlarm),
        (Input::new(p.PIN_6, Pull::Up), Button::MuteAlarm),
        (Input::new(p.PIN_7, Pull::Up), Button::TriggerSensor),
        (Input::new(p.PIN_8, Pull::Up), Button::ControlAlarm),
    ];

    // Spawn tasks
    for (input, button) in buttons {
        unwrap!(spawner.spawn(tasks::button_task(input, button)));
    }
    unwrap!(spawner.spawn(tasks::storage_task(store)));
    unwrap!(spawner.spawn(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");
}
