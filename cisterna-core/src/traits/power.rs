//! Switched power rail trait
//!
//! The sensor front-end and the tone driver stage share one switched
//! rail that is off between wakes. Teardown ordering is owned by the
//! caller: the bus transport must be released to high-impedance before
//! `disable`, or the bus pull-ups leak through the unpowered sensor for
//! the whole sleep interval.

/// Switched peripheral power rail
pub trait PowerRail {
    /// Enable the rail and wait for it to stabilize
    fn enable(&mut self);

    /// Remove rail power
    ///
    /// The caller must have released the sensor bus first.
    fn disable(&mut self);
}
