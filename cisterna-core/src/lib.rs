//! Board-agnostic decision engine for the water level monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (sensor bus, tone output, button, power rail,
//!   wake timer, config storage)
//! - Level classification with hysteresis and debouncing
//! - Escalating alert-window state machine
//! - CRC-protected configuration persistence
//! - Duty-cycle orchestration with leakage-safe power sequencing
//!
//! Every component is an explicitly owned, constructor-injected instance:
//! the same engine that runs on the sensor board runs on the host under
//! `cargo test` with mock collaborators and virtual time.

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod cycle;
pub mod level;
pub mod traits;
