//! Power cycle scheduler
//!
//! Top-level orchestrator. Everything it touches is a constructor-
//! injected collaborator, so the whole engine runs under host tests
//! with mock hardware and virtual time.
//!
//! Teardown order is mandatory on every path, including faults: release
//! the sensor bus to high-impedance first, then drop the rail. The
//! other order leaks roughly a milliamp through the bus pull-ups into
//! the unpowered sensor for the entire sleep interval.

use heapless::Vec;

use crate::alert::AlertCoordinator;
use crate::config::ConfigStore;
use crate::level::{LevelClassifier, WaterLevel};
use crate::traits::{
    BeepPattern, ButtonEvent, ButtonInput, ConfigStorage, PowerRail, SensorBus, SensorChannel,
    ToneOutput, WakeTimer,
};

/// Wake timer period in seconds
pub const WAKE_PERIOD_SEC: u32 = 8;

/// Per-channel conversion poll timeout
pub const MEASURE_TIMEOUT_MS: u16 = 20;

/// Samples taken per channel during calibration
pub const CALIBRATION_SAMPLES: usize = 10;

/// Valid samples required per channel for calibration to proceed
pub const CALIBRATION_MIN_VALID: usize = CALIBRATION_SAMPLES / 2;

/// Calibration entry acknowledgment
const ENTRY_TONE: BeepPattern = BeepPattern::Single;
/// Calibration accepted
const SUCCESS_TONE: BeepPattern = BeepPattern::Double;
/// Calibration rejected; also the halt signal
const FAILURE_TONE: BeepPattern = BeepPattern::Five;

/// What one wake cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Measurement completed
    Measured {
        /// Committed level after this cycle
        level: WaterLevel,
        /// True if an alert window is still open
        alert_active: bool,
    },
    /// Sensor init failed or a channel read was invalid; committed
    /// level untouched, retry next wake
    SensorFault,
    /// Calibration accepted and persisted
    Calibrated,
    /// Calibration rejected or interrupted; prior calibration retained
    CalibrationFailed,
    /// Terminal stop-and-signal state (calibration failed with nothing
    /// stored to fall back to)
    Halted,
}

/// Duty-cycle scheduler
///
/// Owns the decision engine and all hardware collaborators for the
/// lifetime of the device.
pub struct PowerCycle<B, R, T, U, W, S> {
    bus: B,
    rail: R,
    tone: T,
    button: U,
    timer: W,
    store: ConfigStore<S>,
    classifier: LevelClassifier,
    alerts: AlertCoordinator,
    halted: bool,
}

impl<B, R, T, U, W, S> PowerCycle<B, R, T, U, W, S>
where
    B: SensorBus,
    R: PowerRail,
    T: ToneOutput,
    U: ButtonInput,
    W: WakeTimer,
    S: ConfigStorage,
{
    /// Create a scheduler over its collaborators
    ///
    /// Call [`boot`](Self::boot) before the first [`poll`](Self::poll).
    pub fn new(bus: B, rail: R, tone: T, button: U, timer: W, store: ConfigStore<S>) -> Self {
        Self {
            bus,
            rail,
            tone,
            button,
            timer,
            store,
            classifier: LevelClassifier::default(),
            alerts: AlertCoordinator::new(),
            halted: false,
        }
    }

    /// One-time boot sequence
    ///
    /// Loads the stored configuration (factory defaults on corruption),
    /// honors a boot-hold factory reset, and arms the classifier with
    /// threshold and calibration snapshots. Returns true if a valid
    /// stored record was loaded.
    pub fn boot(&mut self) -> bool {
        let mut loaded = self.store.load();

        if let Some(ButtonEvent::BootHold) = self.button.poll() {
            if self.store.factory_reset().is_ok() {
                loaded = false;
                self.rail.enable();
                self.play_blocking(ENTRY_TONE);
                self.power_down();
            }
        }

        self.classifier.set_thresholds(self.store.thresholds());
        self.classifier.set_calibration(self.store.calibration());
        loaded
    }

    /// Run at most one cycle for the pending wake
    ///
    /// Returns `None` when there is nothing to do. Wake requests are
    /// coalesced by the timer; consuming one here processes exactly one
    /// cycle no matter how many timer periods elapsed.
    pub fn poll(&mut self) -> Option<CycleOutcome> {
        let button_event = self.button.poll();
        if button_event.is_none() && !self.timer.take_wake() {
            return None;
        }
        Some(self.run_cycle(button_event))
    }

    /// Committed level from the last successful measurement
    pub fn committed_level(&self) -> WaterLevel {
        self.classifier.committed()
    }

    /// Check if an alert window is open
    pub fn alert_active(&self) -> bool {
        self.alerts.is_active()
    }

    /// Check if the scheduler is in the terminal halt state
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Borrow the configuration store
    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    fn run_cycle(&mut self, button_event: Option<ButtonEvent>) -> CycleOutcome {
        if self.halted {
            // Stop-and-signal: replay the failure code, measure nothing
            self.rail.enable();
            self.play_blocking(FAILURE_TONE);
            self.power_down();
            return CycleOutcome::Halted;
        }

        match button_event {
            Some(ButtonEvent::LongPress) | Some(ButtonEvent::BootHold) => {
                return self.run_calibration();
            }
            Some(ButtonEvent::ShortPress) => {
                self.alerts.silence(&mut self.tone);
            }
            None => {}
        }

        let now_sec = self.timer.ticks().saturating_mul(WAKE_PERIOD_SEC);

        self.rail.enable();
        if self.bus.init().is_err() {
            // Bus fault: skip this cycle, keep the committed level
            self.power_down();
            return CycleOutcome::SensorFault;
        }

        let readings = [
            self.bus.measure(SensorChannel::Ch1, MEASURE_TIMEOUT_MS),
            self.bus.measure(SensorChannel::Ch2, MEASURE_TIMEOUT_MS),
            self.bus.measure(SensorChannel::Ch3, MEASURE_TIMEOUT_MS),
        ];

        let previous = self.classifier.committed();
        let level = self.classifier.classify(&readings);

        if level.is_error() {
            self.power_down();
            return CycleOutcome::SensorFault;
        }

        if level != previous {
            self.alerts.on_level_change(level, now_sec, &mut self.tone);
        }

        if self.alerts.update(now_sec, &mut self.tone) {
            self.hold_for_tone();
        }

        self.power_down();
        CycleOutcome::Measured {
            level,
            alert_active: self.alerts.is_active(),
        }
    }

    /// Multi-sample calibration routine (long button press)
    ///
    /// Averages valid samples per channel; every channel must yield at
    /// least half its samples for the result to be trusted. The result
    /// still has to pass the store's plausibility window.
    fn run_calibration(&mut self) -> CycleOutcome {
        self.rail.enable();
        self.play_blocking(ENTRY_TONE);

        if self.bus.init().is_err() {
            return self.fail_calibration();
        }

        let mut samples: [Vec<i16, CALIBRATION_SAMPLES>; 3] =
            [Vec::new(), Vec::new(), Vec::new()];

        for _ in 0..CALIBRATION_SAMPLES {
            for (slot, channel) in [
                (0, SensorChannel::Ch1),
                (1, SensorChannel::Ch2),
                (2, SensorChannel::Ch3),
            ] {
                let reading = self.bus.measure(channel, MEASURE_TIMEOUT_MS);
                if reading.valid {
                    let _ = samples[slot].push(reading.value_ff);
                }
            }
        }

        if samples.iter().any(|s| s.len() < CALIBRATION_MIN_VALID) {
            return self.fail_calibration();
        }

        let mut averages = [0i16; 3];
        for (slot, channel_samples) in samples.iter().enumerate() {
            let sum: i32 = channel_samples.iter().map(|&v| v as i32).sum();
            averages[slot] = (sum / channel_samples.len() as i32) as i16;
        }

        match self
            .store
            .update_calibration(averages[0], averages[1], averages[2])
        {
            Ok(()) => {
                self.classifier.set_calibration(self.store.calibration());
                self.play_blocking(SUCCESS_TONE);
                self.power_down();
                CycleOutcome::Calibrated
            }
            Err(_) => self.fail_calibration(),
        }
    }

    fn fail_calibration(&mut self) -> CycleOutcome {
        self.play_blocking(FAILURE_TONE);
        self.power_down();

        if !self.store.calibration().valid {
            // Nothing stored to fall back to: the device cannot measure
            // meaningfully, so stop and keep signalling
            self.halted = true;
        }
        CycleOutcome::CalibrationFailed
    }

    /// Keep the rail up while a beep campaign plays out
    ///
    /// Any button press aborts playback and silences the window.
    fn hold_for_tone(&mut self) {
        while self.tone.step() {
            if self.button.is_pressed() {
                self.alerts.silence(&mut self.tone);
                break;
            }
        }
    }

    /// Play a pattern to completion with the rail already up
    fn play_blocking(&mut self, pattern: BeepPattern) {
        self.tone.start(pattern);
        while self.tone.step() {}
    }

    /// Leakage-safe teardown: bus released first, rail last
    fn power_down(&mut self) {
        self.bus.release();
        self.rail.disable();
    }
}
