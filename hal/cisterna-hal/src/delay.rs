//! Blocking delay abstraction
//!
//! Short busy-wait delays for rail stabilization and sensor settling.
//! Delays here are a few milliseconds at most; anything longer belongs
//! to the wake timer.

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u16);
}
