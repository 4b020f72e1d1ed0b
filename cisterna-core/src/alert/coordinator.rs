//! Alert coordinator
//!
//! One alert window at a time: created when the committed level leaves
//! Normal, restarted from scratch on escalation, destroyed on silence,
//! expiry, or any improvement. De-escalation to a better-but-still-low
//! level stops the campaign entirely; alerting resumes only on the next
//! fresh escalation.

use crate::level::WaterLevel;
use crate::traits::{BeepPattern, ToneOutput};

/// Alert campaign parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertConfig {
    /// Beep burst played at each cadence point
    pub pattern: BeepPattern,
    /// Seconds between bursts
    pub cadence_sec: u32,
    /// Total window length in seconds
    pub duration_sec: u32,
}

impl AlertConfig {
    /// Campaign configuration for a level, `None` when no alert applies
    pub const fn for_level(level: WaterLevel) -> Option<Self> {
        match level {
            WaterLevel::Low => Some(Self {
                pattern: BeepPattern::Double,
                cadence_sec: 30,
                duration_sec: 300,
            }),
            WaterLevel::VeryLow => Some(Self {
                pattern: BeepPattern::Triple,
                cadence_sec: 23,
                duration_sec: 300,
            }),
            WaterLevel::Critical => Some(Self {
                pattern: BeepPattern::Five,
                cadence_sec: 15,
                duration_sec: 300,
            }),
            WaterLevel::Normal | WaterLevel::Error => None,
        }
    }
}

/// An active alert window
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct AlertWindow {
    level: WaterLevel,
    config: AlertConfig,
    started_at_sec: u32,
    /// `None` forces a beep on the next tick
    last_beep_sec: Option<u32>,
}

impl AlertWindow {
    fn open(level: WaterLevel, config: AlertConfig, now_sec: u32) -> Self {
        Self {
            level,
            config,
            started_at_sec: now_sec,
            last_beep_sec: None,
        }
    }
}

/// Alert window state machine
#[derive(Debug, Clone, Default)]
pub struct AlertCoordinator {
    window: Option<AlertWindow>,
}

impl AlertCoordinator {
    /// Create an idle coordinator
    pub fn new() -> Self {
        Self { window: None }
    }

    /// Check if an alert window is open
    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    /// Level of the open window, if any
    pub fn active_level(&self) -> Option<WaterLevel> {
        self.window.map(|w| w.level)
    }

    /// Seconds left in the open window, 0 when idle
    pub fn remaining_sec(&self, now_sec: u32) -> u32 {
        match &self.window {
            Some(w) => w
                .config
                .duration_sec
                .saturating_sub(now_sec.saturating_sub(w.started_at_sec)),
            None => 0,
        }
    }

    /// Process a committed level transition
    ///
    /// `Error` carries no level information and is ignored outright.
    pub fn on_level_change<T: ToneOutput>(
        &mut self,
        level: WaterLevel,
        now_sec: u32,
        tone: &mut T,
    ) {
        if level.is_error() {
            return;
        }

        if level == WaterLevel::Normal {
            if self.window.take().is_some() {
                tone.stop();
            }
            return;
        }

        match self.window {
            Some(w) if level.is_worse_than(w.level) => {
                // Escalation: restart the window at the new level so the
                // next tick beeps immediately with the new cadence
                self.window = AlertConfig::for_level(level)
                    .map(|config| AlertWindow::open(level, config, now_sec));
            }
            Some(w) if w.level.is_worse_than(level) => {
                // De-escalation: stop, and do not restart at the better
                // level
                self.window = None;
                tone.stop();
            }
            Some(_) => {
                // Same level: the window runs on undisturbed
            }
            None => {
                self.window = AlertConfig::for_level(level)
                    .map(|config| AlertWindow::open(level, config, now_sec));
            }
        }
    }

    /// Advance the window by one tick
    ///
    /// Returns true while the tone is playing so the caller can hold
    /// the rail powered.
    pub fn update<T: ToneOutput>(&mut self, now_sec: u32, tone: &mut T) -> bool {
        let expired = match &self.window {
            Some(w) => now_sec.saturating_sub(w.started_at_sec) >= w.config.duration_sec,
            None => return false,
        };

        if expired {
            self.window = None;
            tone.stop();
            return false;
        }

        if let Some(w) = self.window.as_mut() {
            let due = match w.last_beep_sec {
                None => true,
                Some(t) => now_sec.saturating_sub(t) >= w.config.cadence_sec,
            };
            if due {
                tone.start(w.config.pattern);
                w.last_beep_sec = Some(now_sec);
            }
        }

        tone.is_active()
    }

    /// Silence the open window
    ///
    /// Unconditional: the window is discarded regardless of remaining
    /// time. Future escalations and fresh alerts after a refill are
    /// unaffected.
    pub fn silence<T: ToneOutput>(&mut self, tone: &mut T) {
        self.window = None;
        tone.stop();
    }
}
