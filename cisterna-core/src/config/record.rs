//! Persisted record layout
//!
//! Fixed 24-byte little-endian block:
//!
//! | offset | field             | type   |
//! |--------|-------------------|--------|
//! | 0      | version           | u16    |
//! | 2      | th_low_ff         | u16    |
//! | 4      | th_vlow_ff        | u16    |
//! | 6      | th_crit_ff        | u16    |
//! | 8      | hysteresis_pct    | u16    |
//! | 10     | base_c1_ff        | i16    |
//! | 12     | base_c2_ff        | i16    |
//! | 14     | base_c3_ff        | i16    |
//! | 16     | calibration_valid | u8     |
//! | 17     | reserved          | u8 × 5 |
//! | 22     | crc16             | u16    |
//!
//! CRC-16/XMODEM (poly 0x1021, init 0x0000, MSB-first, no final XOR)
//! over bytes 0..22.

use crate::level::{CalibrationData, LevelThresholds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current record format version
pub const CONFIG_VERSION: u16 = 0x0001;

/// Total record size in bytes
pub const RECORD_LEN: usize = 24;

/// Offset of the trailing CRC field
const CRC_OFFSET: usize = RECORD_LEN - 2;

/// Reasons a stored record is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Buffer is not exactly `RECORD_LEN` bytes
    Length,
    /// Stored version does not match `CONFIG_VERSION`
    Version,
    /// Checksum mismatch
    Crc,
}

/// In-memory form of the persisted record
///
/// The reserved bytes and checksum exist only in the encoded block;
/// encoding always zeroes the former and recomputes the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersistedConfig {
    /// Record format version
    pub version: u16,
    /// Low threshold (fF)
    pub th_low_ff: u16,
    /// Very-low threshold (fF)
    pub th_vlow_ff: u16,
    /// Critical threshold (fF)
    pub th_crit_ff: u16,
    /// Hysteresis percentage (0-100)
    pub hysteresis_pct: u16,
    /// Channel 1 baseline (fF)
    pub base_c1_ff: i16,
    /// Channel 2 baseline (fF)
    pub base_c2_ff: i16,
    /// Channel 3 baseline (fF)
    pub base_c3_ff: i16,
    /// True once a calibration has been accepted
    pub calibration_valid: bool,
}

impl PersistedConfig {
    /// Compiled-in factory defaults
    pub const FACTORY_DEFAULTS: Self = Self {
        version: CONFIG_VERSION,
        th_low_ff: 800,
        th_vlow_ff: 500,
        th_crit_ff: 300,
        hysteresis_pct: 10,
        base_c1_ff: 0,
        base_c2_ff: 0,
        base_c3_ff: 0,
        calibration_valid: false,
    };

    /// Threshold snapshot for the classifier
    pub fn thresholds(&self) -> LevelThresholds {
        LevelThresholds {
            low_ff: self.th_low_ff as i16,
            vlow_ff: self.th_vlow_ff as i16,
            crit_ff: self.th_crit_ff as i16,
            hysteresis_pct: self.hysteresis_pct.min(100) as u8,
        }
    }

    /// Calibration snapshot for the classifier
    pub fn calibration(&self) -> CalibrationData {
        CalibrationData {
            base_c1_ff: self.base_c1_ff,
            base_c2_ff: self.base_c2_ff,
            base_c3_ff: self.base_c3_ff,
            valid: self.calibration_valid,
        }
    }

    /// Encode into a block, zeroing reserved bytes and stamping the CRC
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut block = [0u8; RECORD_LEN];
        block[0..2].copy_from_slice(&self.version.to_le_bytes());
        block[2..4].copy_from_slice(&self.th_low_ff.to_le_bytes());
        block[4..6].copy_from_slice(&self.th_vlow_ff.to_le_bytes());
        block[6..8].copy_from_slice(&self.th_crit_ff.to_le_bytes());
        block[8..10].copy_from_slice(&self.hysteresis_pct.to_le_bytes());
        block[10..12].copy_from_slice(&self.base_c1_ff.to_le_bytes());
        block[12..14].copy_from_slice(&self.base_c2_ff.to_le_bytes());
        block[14..16].copy_from_slice(&self.base_c3_ff.to_le_bytes());
        block[16] = self.calibration_valid as u8;
        // bytes 17..22 reserved, already zero
        let crc = crc16_xmodem(&block[..CRC_OFFSET]);
        block[CRC_OFFSET..].copy_from_slice(&crc.to_le_bytes());
        block
    }

    /// Decode and validate a stored block
    pub fn decode(block: &[u8]) -> Result<Self, RecordError> {
        if block.len() != RECORD_LEN {
            return Err(RecordError::Length);
        }

        let stored_crc = u16::from_le_bytes([block[CRC_OFFSET], block[CRC_OFFSET + 1]]);
        if crc16_xmodem(&block[..CRC_OFFSET]) != stored_crc {
            return Err(RecordError::Crc);
        }

        let version = u16::from_le_bytes([block[0], block[1]]);
        if version != CONFIG_VERSION {
            return Err(RecordError::Version);
        }

        Ok(Self {
            version,
            th_low_ff: u16::from_le_bytes([block[2], block[3]]),
            th_vlow_ff: u16::from_le_bytes([block[4], block[5]]),
            th_crit_ff: u16::from_le_bytes([block[6], block[7]]),
            hysteresis_pct: u16::from_le_bytes([block[8], block[9]]),
            base_c1_ff: i16::from_le_bytes([block[10], block[11]]),
            base_c2_ff: i16::from_le_bytes([block[12], block[13]]),
            base_c3_ff: i16::from_le_bytes([block[14], block[15]]),
            calibration_valid: block[16] != 0,
        })
    }
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self::FACTORY_DEFAULTS
    }
}

/// CRC-16/XMODEM
///
/// Polynomial 0x1021, initial value 0x0000, MSB-first, no final XOR.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;

    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}
