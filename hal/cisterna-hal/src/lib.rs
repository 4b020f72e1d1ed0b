//! Hardware abstraction traits for the Cisterna water level monitor
//!
//! These traits sit between the board-agnostic drivers and the
//! chip-specific register code. Everything here is synchronous and
//! allocation-free; on a sleepy battery device the main loop is the
//! only execution context that matters.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod pwm;

pub use delay::DelayMs;
pub use gpio::{InputPin, OutputPin};
pub use pwm::TonePwm;
