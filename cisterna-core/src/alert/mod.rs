//! Alert window management
//!
//! Turns committed level transitions into bounded, cadence-repeating
//! beep campaigns with escalation and user-silence semantics.

pub mod coordinator;

pub use coordinator::{AlertConfig, AlertCoordinator};
