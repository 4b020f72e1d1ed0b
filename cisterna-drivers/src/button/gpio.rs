//! GPIO button press classifier
//!
//! Classifies raw pin state into the three press events the engine
//! understands. The button is active-low (pulled up, shorted to ground
//! when pressed). Durations accumulate per poll, so classification
//! resolution equals the poll interval; during sleep the engine polls
//! once per wake, which is fine because a sleeping device has no alert
//! to silence.

use cisterna_core::traits::{ButtonEvent, ButtonInput};
use cisterna_hal::InputPin;

/// Hold time that turns a press into calibration entry
pub const LONG_PRESS_MS: u32 = 3000;

/// Hold time from power-on that requests a factory reset
pub const BOOT_HOLD_MS: u32 = 5000;

/// Press classifier over an active-low input pin
pub struct GpioButton<P> {
    pin: P,
    poll_interval_ms: u16,
    was_pressed: bool,
    held_ms: u32,
    /// Press has been continuous since power-on
    from_boot: bool,
    /// A boot-hold already fired; swallow the trailing release
    suppress_release: bool,
}

impl<P: InputPin> GpioButton<P> {
    /// Create a classifier
    ///
    /// `poll_interval_ms` is the caller's polling period; held time is
    /// accumulated in these units. A button already pressed at
    /// construction is a factory-reset candidate.
    pub fn new(pin: P, poll_interval_ms: u16) -> Self {
        let pressed = pin.is_low();
        Self {
            pin,
            poll_interval_ms,
            was_pressed: pressed,
            held_ms: 0,
            from_boot: pressed,
            suppress_release: false,
        }
    }

    /// How long the button has been held, in milliseconds
    pub fn held_ms(&self) -> u32 {
        self.held_ms
    }
}

impl<P: InputPin> ButtonInput for GpioButton<P> {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }

    fn poll(&mut self) -> Option<ButtonEvent> {
        let pressed = self.is_pressed();
        let mut event = None;

        if pressed && !self.was_pressed {
            // Fresh press
            self.held_ms = 0;
        } else if pressed {
            // Still held
            self.held_ms = self.held_ms.saturating_add(self.poll_interval_ms as u32);

            if self.from_boot && self.held_ms >= BOOT_HOLD_MS {
                self.from_boot = false;
                self.suppress_release = true;
                event = Some(ButtonEvent::BootHold);
            }
        } else if self.was_pressed {
            // Released: classify by accumulated hold time
            self.from_boot = false;

            if self.suppress_release {
                self.suppress_release = false;
            } else if self.held_ms >= LONG_PRESS_MS {
                event = Some(ButtonEvent::LongPress);
            } else {
                event = Some(ButtonEvent::ShortPress);
            }

            self.held_ms = 0;
        } else {
            // Idle; once the pin has been seen released the boot-hold
            // window is over for good
            self.from_boot = false;
        }

        self.was_pressed = pressed;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Mock pin whose level the test scripts externally
    struct MockPin<'a> {
        level: &'a Cell<bool>,
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    /// Poll `n` times, asserting no event fires along the way
    fn poll_quietly<P: InputPin>(button: &mut GpioButton<P>, n: u32) {
        for _ in 0..n {
            assert_eq!(button.poll(), None);
        }
    }

    #[test]
    fn test_idle_produces_nothing() {
        let level = Cell::new(true); // released (pulled up)
        let mut button = GpioButton::new(MockPin { level: &level }, 100);
        poll_quietly(&mut button, 10);
    }

    #[test]
    fn test_short_press() {
        let level = Cell::new(true);
        let mut button = GpioButton::new(MockPin { level: &level }, 100);

        level.set(false); // pressed
        poll_quietly(&mut button, 5); // 400 ms held

        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::ShortPress));

        // Nothing lingers after the release
        poll_quietly(&mut button, 3);
    }

    #[test]
    fn test_long_press() {
        let level = Cell::new(true);
        let mut button = GpioButton::new(MockPin { level: &level }, 100);

        level.set(false);
        poll_quietly(&mut button, 32); // 3100 ms held

        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_long_press_boundary() {
        let level = Cell::new(true);
        let mut button = GpioButton::new(MockPin { level: &level }, 100);

        // 2900 ms is still a short press
        level.set(false);
        poll_quietly(&mut button, 30);
        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::ShortPress));

        // 3000 ms exactly is long
        level.set(false);
        poll_quietly(&mut button, 31);
        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_boot_hold_fires_while_held() {
        let level = Cell::new(false); // held at power-on
        let mut button = GpioButton::new(MockPin { level: &level }, 100);

        // 4900 ms: not yet
        poll_quietly(&mut button, 49);

        // 5000 ms: factory reset request, no release needed
        assert_eq!(button.poll(), Some(ButtonEvent::BootHold));

        // The eventual release is swallowed
        level.set(true);
        assert_eq!(button.poll(), None);
    }

    #[test]
    fn test_boot_press_released_early_is_a_normal_press() {
        let level = Cell::new(false);
        let mut button = GpioButton::new(MockPin { level: &level }, 100);

        poll_quietly(&mut button, 10); // 1000 ms
        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::ShortPress));

        // A later 5 s hold is a long press, not a factory reset
        level.set(false);
        poll_quietly(&mut button, 55);
        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_is_pressed_tracks_pin() {
        let level = Cell::new(true);
        let button = GpioButton::new(MockPin { level: &level }, 100);

        assert!(!button.is_pressed());
        level.set(false);
        assert!(button.is_pressed());
    }
}
