//! Water level determination
//!
//! Turns raw per-channel capacitance deltas into a debounced,
//! hysteresis-stable committed level.

pub mod classifier;
pub mod types;

pub use classifier::{LevelClassifier, DEBOUNCE_SAMPLES};
pub use types::{CalibrationData, LevelThresholds, WaterLevel};
