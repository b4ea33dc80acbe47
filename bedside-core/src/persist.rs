//! Alarm configuration persistence
//!
//! The alarm setting is stored as a small postcard record under
//! [`StorageKey::AlarmConfig`]. A leading version byte lets future
//! firmware reject records it cannot read instead of misinterpreting them.

use bedside_hal::{FlashError, FlashStorage, StorageKey};
use serde::{Deserialize, Serialize};

use crate::alarm::AlarmConfig;

/// Current record layout version
pub const ALARM_RECORD_VERSION: u8 = 1;

/// Upper bound on the encoded record size
pub const ALARM_RECORD_MAX_LEN: usize = 16;

#[derive(Serialize, Deserialize)]
struct AlarmRecord {
    version: u8,
    config: AlarmConfig,
}

/// Errors from loading or saving the alarm config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash(FlashError),
    /// Record could not be serialized
    Encode,
    /// Stored bytes are not a valid record
    Decode,
    /// Record was written by an incompatible firmware
    UnsupportedVersion(u8),
    /// Record decoded but holds an impossible time
    Invalid,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Alarm config store over any flash backend
pub struct AlarmStore<S> {
    storage: S,
}

impl<S: FlashStorage> AlarmStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Give back the storage backend
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Read the stored config
    pub async fn load(&mut self) -> Result<AlarmConfig, StoreError> {
        let mut buf = [0u8; ALARM_RECORD_MAX_LEN];
        let len = self.storage.read(StorageKey::AlarmConfig, &mut buf).await?;
        let bytes = buf.get(..len).ok_or(StoreError::Decode)?;

        let record: AlarmRecord = postcard::from_bytes(bytes).map_err(|_| StoreError::Decode)?;
        if record.version != ALARM_RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion(record.version));
        }
        if !record.config.is_valid() {
            return Err(StoreError::Invalid);
        }
        Ok(record.config)
    }

    /// Read the stored config, falling back to `default` on any error
    ///
    /// Returns the error alongside so the caller can report it.
    pub async fn load_or(&mut self, default: AlarmConfig) -> (AlarmConfig, Option<StoreError>) {
        match self.load().await {
            Ok(config) => (config, None),
            Err(e) => (default, Some(e)),
        }
    }

    /// Write the config
    pub async fn save(&mut self, config: &AlarmConfig) -> Result<(), StoreError> {
        let record = AlarmRecord {
            version: ALARM_RECORD_VERSION,
            config: *config,
        };
        let mut buf = [0u8; ALARM_RECORD_MAX_LEN];
        let bytes = postcard::to_slice(&record, &mut buf).map_err(|_| StoreError::Encode)?;
        self.storage.write(StorageKey::AlarmConfig, bytes).await?;
        Ok(())
    }
}
