//! Tone PWM abstraction
//!
//! A fixed-frequency square wave gate for the piezo driver stage. The
//! carrier frequency and duty cycle are configured once by the chip
//! implementation (tuned to the piezo's resonant peak); the pattern
//! driver only switches the carrier on and off to shape beeps.

/// Fixed-frequency PWM tone gate
pub trait TonePwm {
    /// Start emitting the carrier
    fn enable(&mut self);

    /// Stop emitting the carrier and leave the output pin low
    fn disable(&mut self);

    /// Check if the carrier is currently being emitted
    fn is_enabled(&self) -> bool;
}
