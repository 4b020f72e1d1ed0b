//! Level classifier
//!
//! Per cycle: subtract the calibration baseline, classify against
//! hysteresis-widened thresholds with worst-channel-wins priority, and
//! debounce the result over consecutive cycles before committing.

use super::types::{CalibrationData, LevelThresholds, WaterLevel};
use crate::traits::ChannelReading;

/// Consecutive identical classifications required to commit a change
pub const DEBOUNCE_SAMPLES: u8 = 3;

/// Debounce tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct DebounceState {
    /// Most recent instantaneous classification
    pending: WaterLevel,
    /// Consecutive cycles the pending level has repeated
    count: u8,
}

/// Water level classifier
///
/// Owns the committed level and the debounce state. A fault reading
/// passes straight through as `Error` without touching either, so one
/// bad bus cycle can neither clear a standing alert nor count toward a
/// level change.
#[derive(Debug, Clone)]
pub struct LevelClassifier {
    thresholds: LevelThresholds,
    calibration: CalibrationData,
    committed: WaterLevel,
    debounce: DebounceState,
}

impl LevelClassifier {
    /// Create a classifier with the given thresholds and calibration
    pub fn new(thresholds: LevelThresholds, calibration: CalibrationData) -> Self {
        Self {
            thresholds,
            calibration,
            committed: WaterLevel::Normal,
            debounce: DebounceState {
                pending: WaterLevel::Normal,
                count: 0,
            },
        }
    }

    /// Replace the thresholds
    pub fn set_thresholds(&mut self, thresholds: LevelThresholds) {
        self.thresholds = thresholds;
    }

    /// Replace the calibration baseline
    pub fn set_calibration(&mut self, calibration: CalibrationData) {
        self.calibration = calibration;
    }

    /// Get the committed level without a new measurement
    pub fn committed(&self) -> WaterLevel {
        self.committed
    }

    /// Process one cycle of channel readings
    ///
    /// Returns `Error` if any reading is invalid, otherwise the
    /// committed level after debouncing.
    pub fn classify(&mut self, readings: &[ChannelReading; 3]) -> WaterLevel {
        if readings.iter().any(|r| !r.valid) {
            return WaterLevel::Error;
        }

        let (mut c1, mut c2, mut c3) = (
            readings[0].value_ff as i32,
            readings[1].value_ff as i32,
            readings[2].value_ff as i32,
        );

        if self.calibration.valid {
            c1 -= self.calibration.base_c1_ff as i32;
            c2 -= self.calibration.base_c2_ff as i32;
            c3 -= self.calibration.base_c3_ff as i32;
        }

        let instantaneous = self.instantaneous(c1, c2, c3);

        if instantaneous != self.debounce.pending {
            self.debounce.pending = instantaneous;
            self.debounce.count = 1;
        } else {
            self.debounce.count = self.debounce.count.saturating_add(1);
            if self.debounce.count >= DEBOUNCE_SAMPLES {
                self.committed = instantaneous;
                self.debounce.count = DEBOUNCE_SAMPLES; // clamp
            }
        }

        self.committed
    }

    /// Classify one sample against hysteresis-widened thresholds
    ///
    /// A tier's threshold is widened by its hysteresis offset while the
    /// committed level is at or past that tier, so leaving the tier
    /// requires crossing `threshold + hysteresis` rather than the bare
    /// threshold.
    fn instantaneous(&self, c1: i32, c2: i32, c3: i32) -> WaterLevel {
        let pct = self.thresholds.hysteresis_pct as i32;
        // Committed is never Error; rank 0 covers a fresh classifier.
        let committed_rank = self.committed.severity().unwrap_or(0);

        let mut th_low = self.thresholds.low_ff as i32;
        let mut th_vlow = self.thresholds.vlow_ff as i32;
        let mut th_crit = self.thresholds.crit_ff as i32;

        if committed_rank >= 3 {
            th_crit += th_crit * pct / 100;
        }
        if committed_rank >= 2 {
            th_vlow += th_vlow * pct / 100;
        }
        if committed_rank >= 1 {
            th_low += th_low * pct / 100;
        }

        // Worst channel wins, checked worst-first
        if c3 < th_crit {
            return WaterLevel::Critical;
        }
        if c2 < th_vlow {
            return WaterLevel::VeryLow;
        }
        if c1 < th_low {
            return WaterLevel::Low;
        }
        WaterLevel::Normal
    }
}

impl Default for LevelClassifier {
    fn default() -> Self {
        Self::new(LevelThresholds::default(), CalibrationData::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ChannelReading;

    fn readings(c1: i16, c2: i16, c3: i16) -> [ChannelReading; 3] {
        [
            ChannelReading::valid(c1),
            ChannelReading::valid(c2),
            ChannelReading::valid(c3),
        ]
    }

    /// Feed the same sample until it commits
    fn settle(classifier: &mut LevelClassifier, c1: i16, c2: i16, c3: i16) -> WaterLevel {
        let mut level = WaterLevel::Normal;
        for _ in 0..DEBOUNCE_SAMPLES {
            level = classifier.classify(&readings(c1, c2, c3));
        }
        level
    }

    #[test]
    fn test_full_tank_is_normal() {
        let mut classifier = LevelClassifier::default();
        assert_eq!(settle(&mut classifier, 1200, 1100, 1000), WaterLevel::Normal);
    }

    #[test]
    fn test_scenario_low_level() {
        // c1 below the 800 fF low threshold, others healthy
        let mut classifier = LevelClassifier::default();
        assert_eq!(settle(&mut classifier, 600, 1100, 1000), WaterLevel::Low);
    }

    #[test]
    fn test_critical_priority_over_other_channels() {
        // Channel 3 below its threshold wins regardless of channels 1-2
        for c1 in [-2000i16, 0, 600, 1200, 5000] {
            for c2 in [-2000i16, 0, 400, 1100, 5000] {
                let mut classifier = LevelClassifier::default();
                assert_eq!(
                    settle(&mut classifier, c1, c2, 200),
                    WaterLevel::Critical,
                    "c1={} c2={}",
                    c1,
                    c2
                );
            }
        }
    }

    #[test]
    fn test_single_sample_does_not_commit() {
        let mut classifier = LevelClassifier::default();
        settle(&mut classifier, 1200, 1100, 1000);

        // One Low sample must not change the committed level
        let level = classifier.classify(&readings(600, 1100, 1000));
        assert_eq!(level, WaterLevel::Normal);

        // Nor two
        let level = classifier.classify(&readings(600, 1100, 1000));
        assert_eq!(level, WaterLevel::Normal);

        // The third consecutive sample commits
        let level = classifier.classify(&readings(600, 1100, 1000));
        assert_eq!(level, WaterLevel::Low);
    }

    #[test]
    fn test_differing_sample_resets_debounce() {
        let mut classifier = LevelClassifier::default();
        settle(&mut classifier, 1200, 1100, 1000);

        classifier.classify(&readings(600, 1100, 1000));
        classifier.classify(&readings(600, 1100, 1000));
        // A differing sample restarts the count on the new value
        classifier.classify(&readings(1200, 1100, 1000));
        classifier.classify(&readings(600, 1100, 1000));
        let level = classifier.classify(&readings(600, 1100, 1000));
        assert_eq!(level, WaterLevel::Normal);
    }

    #[test]
    fn test_hysteresis_widens_exit_threshold() {
        // low=800, 10% hysteresis: exit requires >= 880, not 800
        let mut classifier = LevelClassifier::default();
        assert_eq!(settle(&mut classifier, 600, 1100, 1000), WaterLevel::Low);

        // 810 is above the bare threshold but inside the hysteresis band
        assert_eq!(settle(&mut classifier, 810, 1100, 1000), WaterLevel::Low);

        // 880 crosses threshold + hysteresis and releases the tier
        assert_eq!(settle(&mut classifier, 880, 1100, 1000), WaterLevel::Normal);
    }

    #[test]
    fn test_hysteresis_does_not_delay_entry() {
        // While committed Normal the bare thresholds apply going down
        let mut classifier = LevelClassifier::default();
        settle(&mut classifier, 1200, 1100, 1000);
        assert_eq!(settle(&mut classifier, 799, 1100, 1000), WaterLevel::Low);
    }

    #[test]
    fn test_calibration_baseline_subtracted() {
        let mut classifier = LevelClassifier::new(
            LevelThresholds::default(),
            CalibrationData::new(500, 500, 500),
        );

        // Raw 1200 fF corrects to 700, below the 800 fF low threshold
        assert_eq!(settle(&mut classifier, 1200, 1600, 1600), WaterLevel::Low);
    }

    #[test]
    fn test_invalid_reading_reports_error() {
        let mut classifier = LevelClassifier::default();
        settle(&mut classifier, 600, 1100, 1000);

        let mut faulted = readings(600, 1100, 1000);
        faulted[1] = ChannelReading::invalid();
        assert_eq!(classifier.classify(&faulted), WaterLevel::Error);
    }

    #[test]
    fn test_error_leaves_committed_and_debounce_untouched() {
        let mut classifier = LevelClassifier::default();
        settle(&mut classifier, 600, 1100, 1000);
        assert_eq!(classifier.committed(), WaterLevel::Low);

        // Two samples toward Normal, then a fault, then the third sample:
        // the fault must not reset the debounce count
        classifier.classify(&readings(1200, 1100, 1000));
        classifier.classify(&readings(1200, 1100, 1000));
        let faulted = [
            ChannelReading::invalid(),
            ChannelReading::invalid(),
            ChannelReading::invalid(),
        ];
        assert_eq!(classifier.classify(&faulted), WaterLevel::Error);
        assert_eq!(classifier.committed(), WaterLevel::Low);

        let level = classifier.classify(&readings(1200, 1100, 1000));
        assert_eq!(level, WaterLevel::Normal);
    }
}
