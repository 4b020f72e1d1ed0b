//! Tone output implementations

pub mod pattern;

pub use pattern::{PatternTone, BEEP_DURATION_MS, BEEP_GAP_MS};
