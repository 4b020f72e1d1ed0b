//! Level model types
//!
//! Severity is an explicit rank rather than a derived ordering because
//! the `Error` sentinel takes part in no comparison: a sensor fault is
//! neither better nor worse than any water level.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete water levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WaterLevel {
    /// Above the Low electrode
    Normal,
    /// Below Low, above Very-Low
    Low,
    /// Below Very-Low, above Critical
    VeryLow,
    /// Below the Critical electrode
    Critical,
    /// Sensor or bus fault; no level information this cycle
    Error,
}

impl WaterLevel {
    /// Severity rank, `None` for the unordered `Error` sentinel
    pub const fn severity(self) -> Option<u8> {
        match self {
            WaterLevel::Normal => Some(0),
            WaterLevel::Low => Some(1),
            WaterLevel::VeryLow => Some(2),
            WaterLevel::Critical => Some(3),
            WaterLevel::Error => None,
        }
    }

    /// Strict severity comparison; always false when either side is `Error`
    pub fn is_worse_than(self, other: WaterLevel) -> bool {
        match (self.severity(), other.severity()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// Check if this is the fault sentinel
    pub const fn is_error(self) -> bool {
        matches!(self, WaterLevel::Error)
    }
}

/// Level detection thresholds (femtofarads)
///
/// One threshold per physical electrode; the channels are independent
/// and decision priority is worst-channel-wins, so no cross-channel
/// ordering is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelThresholds {
    /// Low water threshold (channel 1)
    pub low_ff: i16,
    /// Very-low water threshold (channel 2)
    pub vlow_ff: i16,
    /// Critical water threshold (channel 3)
    pub crit_ff: i16,
    /// Hysteresis as a percentage of each threshold (0-100)
    pub hysteresis_pct: u8,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            low_ff: 800,
            vlow_ff: 500,
            crit_ff: 300,
            hysteresis_pct: 10,
        }
    }
}

/// Calibration baselines (femtofarads)
///
/// Per-channel full-tank readings subtracted from raw deltas before
/// thresholding. Invalid until the user has run a calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationData {
    /// Channel 1 baseline
    pub base_c1_ff: i16,
    /// Channel 2 baseline
    pub base_c2_ff: i16,
    /// Channel 3 baseline
    pub base_c3_ff: i16,
    /// True once a calibration has been accepted
    pub valid: bool,
}

impl CalibrationData {
    /// Create a valid calibration from per-channel baselines
    pub const fn new(base_c1_ff: i16, base_c2_ff: i16, base_c3_ff: i16) -> Self {
        Self {
            base_c1_ff,
            base_c2_ff,
            base_c3_ff,
            valid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(WaterLevel::Low.is_worse_than(WaterLevel::Normal));
        assert!(WaterLevel::VeryLow.is_worse_than(WaterLevel::Low));
        assert!(WaterLevel::Critical.is_worse_than(WaterLevel::VeryLow));
        assert!(!WaterLevel::Normal.is_worse_than(WaterLevel::Critical));
        assert!(!WaterLevel::Low.is_worse_than(WaterLevel::Low));
    }

    #[test]
    fn test_error_is_unordered() {
        assert_eq!(WaterLevel::Error.severity(), None);
        assert!(!WaterLevel::Error.is_worse_than(WaterLevel::Normal));
        assert!(!WaterLevel::Critical.is_worse_than(WaterLevel::Error));
    }

    #[test]
    fn test_default_thresholds() {
        let th = LevelThresholds::default();
        assert_eq!(th.low_ff, 800);
        assert_eq!(th.vlow_ff, 500);
        assert_eq!(th.crit_ff, 300);
        assert_eq!(th.hysteresis_pct, 10);
    }

    #[test]
    fn test_calibration_starts_invalid() {
        assert!(!CalibrationData::default().valid);
        assert!(CalibrationData::new(10, 20, 30).valid);
    }
}
