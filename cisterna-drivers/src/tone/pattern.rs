//! Beep pattern player
//!
//! Shapes the fixed-frequency carrier into bursts of short beeps. Each
//! `step` call advances playback by one millisecond of real time, so
//! the caller's hold loop is also the pattern clock.

use cisterna_core::traits::{BeepPattern, ToneOutput};
use cisterna_hal::{DelayMs, TonePwm};

/// Length of one beep
pub const BEEP_DURATION_MS: u16 = 100;

/// Silence between beeps in a burst
pub const BEEP_GAP_MS: u16 = 100;

/// Playback advance per `step` call
const STEP_MS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Beep,
    Gap,
}

/// Pattern player over a tone PWM gate
pub struct PatternTone<P, D> {
    pwm: P,
    delay: D,
    beeps_remaining: u8,
    phase: Phase,
    phase_elapsed_ms: u16,
}

impl<P: TonePwm, D: DelayMs> PatternTone<P, D> {
    /// Create a pattern player
    pub fn new(pwm: P, delay: D) -> Self {
        Self {
            pwm,
            delay,
            beeps_remaining: 0,
            phase: Phase::Beep,
            phase_elapsed_ms: 0,
        }
    }

    /// Get access to the underlying PWM gate
    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: TonePwm, D: DelayMs> ToneOutput for PatternTone<P, D> {
    fn start(&mut self, pattern: BeepPattern) {
        self.beeps_remaining = pattern.beeps();
        self.phase = Phase::Beep;
        self.phase_elapsed_ms = 0;
        self.pwm.enable();
    }

    fn step(&mut self) -> bool {
        if self.beeps_remaining == 0 {
            return false;
        }

        self.delay.delay_ms(STEP_MS);
        self.phase_elapsed_ms += STEP_MS;

        match self.phase {
            Phase::Beep => {
                if self.phase_elapsed_ms >= BEEP_DURATION_MS {
                    self.phase_elapsed_ms = 0;
                    self.beeps_remaining -= 1;

                    if self.beeps_remaining == 0 {
                        // Burst complete
                        self.pwm.disable();
                        return false;
                    }

                    self.phase = Phase::Gap;
                    self.pwm.disable();
                }
            }
            Phase::Gap => {
                if self.phase_elapsed_ms >= BEEP_GAP_MS {
                    self.phase_elapsed_ms = 0;
                    self.phase = Phase::Beep;
                    self.pwm.enable();
                }
            }
        }

        true
    }

    fn stop(&mut self) {
        self.pwm.disable();
        self.beeps_remaining = 0;
        self.phase = Phase::Beep;
        self.phase_elapsed_ms = 0;
    }

    fn is_active(&self) -> bool {
        self.beeps_remaining > 0
    }
}
