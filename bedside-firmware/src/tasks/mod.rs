//! Embassy async tasks
//!
//! Button tasks only enqueue events. The controller task owns all alarm
//! state; the storage task writes the alarm to flash in the background.

pub mod buttons;
pub mod controller;
pub mod storage;

pub use buttons::button_task;
pub use controller::controller_task;
pub use storage::storage_task;
