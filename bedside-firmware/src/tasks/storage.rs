//! Alarm persistence task
//!
//! Flash writes take milliseconds, so they run here instead of inside the
//! controller cycle. Requests arriving during a write collapse into the
//! newest one.

use bedside_core::persist::AlarmStore;
use defmt::*;

use crate::channels::SAVE_REQUEST;
use crate::storage::RpFlashStorage;

/// Storage task - writes every requested alarm config
#[embassy_executor::task]
pub async fn storage_task(mut store: AlarmStore<RpFlashStorage<'static>>) {
    info!("Storage task started");

    loop {
        let config = SAVE_REQUEST.wait().await;
        match store.save(&config).await {
            Ok(()) => info!("Alarm saved: {:?}", config),
            Err(e) => error!("Failed to save alarm: {:?}", e),
        }
    }
}
