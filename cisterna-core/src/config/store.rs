//! Configuration store
//!
//! Owns the storage cell and the only mutable copy of the persisted
//! record. Every other component works from value snapshots, so a
//! half-applied update cannot exist anywhere in the system: the cache
//! changes only after the block has been written successfully.

use super::record::{PersistedConfig, RECORD_LEN};
use crate::level::{CalibrationData, LevelThresholds};
use crate::traits::{ConfigStorage, StorageError};

/// Calibration plausibility window: |baseline| must stay inside the
/// sensor's differential range
pub const CALIBRATION_MAX_ABS_FF: i16 = 5000;

/// Minimum plausible full-tank baseline; anything lower means the
/// electrodes were dry during calibration
pub const CALIBRATION_MIN_FF: i16 = 200;

/// Errors from configuration updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Candidate calibration outside the plausible physical window
    CalibrationOutOfRange,
    /// Storage cell failed
    Storage(StorageError),
}

impl From<StorageError> for ConfigError {
    fn from(err: StorageError) -> Self {
        ConfigError::Storage(err)
    }
}

/// Persistent configuration store
pub struct ConfigStore<S> {
    storage: S,
    cache: PersistedConfig,
}

impl<S: ConfigStorage> ConfigStore<S> {
    /// Create a store over a storage cell
    ///
    /// The cache starts at factory defaults; call [`load`](Self::load)
    /// before first use.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cache: PersistedConfig::FACTORY_DEFAULTS,
        }
    }

    /// Load the stored record into the cache
    ///
    /// Returns true if a valid record was loaded. On a read failure,
    /// version mismatch, or CRC mismatch the cache is replaced with
    /// factory defaults wholesale; a corrupt record is never partially
    /// applied.
    pub fn load(&mut self) -> bool {
        let mut block = [0u8; RECORD_LEN];

        let loaded = match self.storage.read_block(&mut block) {
            Ok(()) => PersistedConfig::decode(&block).ok(),
            Err(_) => None,
        };

        match loaded {
            Some(config) => {
                self.cache = config;
                true
            }
            None => {
                self.cache = PersistedConfig::FACTORY_DEFAULTS;
                false
            }
        }
    }

    /// Current threshold snapshot
    pub fn thresholds(&self) -> LevelThresholds {
        self.cache.thresholds()
    }

    /// Current calibration snapshot
    pub fn calibration(&self) -> CalibrationData {
        self.cache.calibration()
    }

    /// Copy of the cached record
    pub fn config(&self) -> PersistedConfig {
        self.cache
    }

    /// Replace the thresholds and persist
    pub fn update_thresholds(&mut self, thresholds: LevelThresholds) -> Result<(), ConfigError> {
        let mut candidate = self.cache;
        candidate.th_low_ff = thresholds.low_ff as u16;
        candidate.th_vlow_ff = thresholds.vlow_ff as u16;
        candidate.th_crit_ff = thresholds.crit_ff as u16;
        candidate.hysteresis_pct = thresholds.hysteresis_pct as u16;
        self.persist(candidate)
    }

    /// Validate and persist new calibration baselines
    ///
    /// Rejects any value outside ±[`CALIBRATION_MAX_ABS_FF`] or below
    /// [`CALIBRATION_MIN_FF`] (a baseline that small means the tank was
    /// not full during calibration). On rejection the cache and the
    /// stored record are untouched.
    pub fn update_calibration(&mut self, c1_ff: i16, c2_ff: i16, c3_ff: i16) -> Result<(), ConfigError> {
        for value in [c1_ff, c2_ff, c3_ff] {
            if value < -CALIBRATION_MAX_ABS_FF || value > CALIBRATION_MAX_ABS_FF {
                return Err(ConfigError::CalibrationOutOfRange);
            }
            if value < CALIBRATION_MIN_FF {
                return Err(ConfigError::CalibrationOutOfRange);
            }
        }

        let mut candidate = self.cache;
        candidate.base_c1_ff = c1_ff;
        candidate.base_c2_ff = c2_ff;
        candidate.base_c3_ff = c3_ff;
        candidate.calibration_valid = true;
        self.persist(candidate)
    }

    /// Overwrite the stored record with compiled-in defaults
    pub fn factory_reset(&mut self) -> Result<(), ConfigError> {
        self.persist(PersistedConfig::FACTORY_DEFAULTS)
    }

    /// Stamp, write, then update the cache
    fn persist(&mut self, mut candidate: PersistedConfig) -> Result<(), ConfigError> {
        candidate.version = super::record::CONFIG_VERSION;
        let block = candidate.encode();
        self.storage.write_block(&block)?;
        self.cache = candidate;
        Ok(())
    }
}
