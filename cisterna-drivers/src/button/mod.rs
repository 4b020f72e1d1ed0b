//! Button input implementations

pub mod gpio;

pub use gpio::{GpioButton, BOOT_HOLD_MS, LONG_PRESS_MS};
