//! Duty-cycle orchestration
//!
//! Sequences one bounded measurement-and-alert cycle per wake: button
//! routing, sensor power-up, classification, alert hold, and the
//! leakage-safe teardown that dominates the standby power budget.

pub mod scheduler;

pub use scheduler::{
    CycleOutcome, PowerCycle, CALIBRATION_MIN_VALID, CALIBRATION_SAMPLES, MEASURE_TIMEOUT_MS,
    WAKE_PERIOD_SEC,
};
