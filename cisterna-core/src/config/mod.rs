//! Configuration persistence
//!
//! One versioned, CRC-protected record holds the level thresholds and
//! calibration baselines. The record format is fixed at 24 bytes so it
//! fits the smallest EEPROM this family of boards ships with.

pub mod record;
pub mod store;

pub use record::{crc16_xmodem, PersistedConfig, RecordError, CONFIG_VERSION, RECORD_LEN};
pub use store::{ConfigError, ConfigStore};
