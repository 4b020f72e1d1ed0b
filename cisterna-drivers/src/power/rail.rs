//! Switched sensor rail
//!
//! Drives the load-switch enable pin for the rail feeding the sensor
//! front-end and the tone driver stage. Enabling waits out the switch
//! rise time plus peripheral startup before returning, so callers can
//! talk to the sensor immediately afterwards.

use cisterna_core::traits::PowerRail;
use cisterna_hal::{DelayMs, OutputPin};

/// Default post-enable settle time (load switch rise plus sensor start)
pub const DEFAULT_STABILIZE_MS: u16 = 5;

/// Load-switch power rail
pub struct SwitchedRail<P, D> {
    pin: P,
    delay: D,
    stabilize_ms: u16,
}

impl<P: OutputPin, D: DelayMs> SwitchedRail<P, D> {
    /// Create a rail with the default settle time
    pub fn new(pin: P, delay: D) -> Self {
        Self::with_stabilization(pin, delay, DEFAULT_STABILIZE_MS)
    }

    /// Create a rail with an explicit settle time
    pub fn with_stabilization(mut pin: P, delay: D, stabilize_ms: u16) -> Self {
        // Rail starts off
        pin.set_low();
        Self {
            pin,
            delay,
            stabilize_ms,
        }
    }

    /// Check if the rail is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl<P: OutputPin, D: DelayMs> PowerRail for SwitchedRail<P, D> {
    fn enable(&mut self) {
        self.pin.set_high();
        self.delay.delay_ms(self.stabilize_ms);
    }

    fn disable(&mut self) {
        self.pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
    }

    impl DelayMs for MockDelay {
        fn delay_ms(&mut self, ms: u16) {
            self.total_ms += ms as u32;
        }
    }

    #[test]
    fn test_rail_starts_off() {
        let rail = SwitchedRail::new(MockPin { high: true }, MockDelay::default());
        assert!(!rail.is_enabled());
    }

    #[test]
    fn test_enable_waits_for_settle() {
        let mut rail = SwitchedRail::new(MockPin::default(), MockDelay::default());

        rail.enable();
        assert!(rail.is_enabled());
        assert_eq!(rail.delay.total_ms, DEFAULT_STABILIZE_MS as u32);
    }

    #[test]
    fn test_disable_drops_pin_immediately() {
        let mut rail = SwitchedRail::new(MockPin::default(), MockDelay::default());

        rail.enable();
        let settled = rail.delay.total_ms;
        rail.disable();

        assert!(!rail.is_enabled());
        // No delay on the way down
        assert_eq!(rail.delay.total_ms, settled);
    }

    #[test]
    fn test_custom_stabilization() {
        let mut rail =
            SwitchedRail::with_stabilization(MockPin::default(), MockDelay::default(), 10);
        rail.enable();
        assert_eq!(rail.delay.total_ms, 10);
    }
}
