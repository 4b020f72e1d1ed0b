//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in cisterna-core, built over the pin-level traits in
//! cisterna-hal:
//!
//! - Beep pattern player (tone PWM gate)
//! - Button press classifier (GPIO input)
//! - Switched sensor rail (GPIO output + stabilization delay)
//!
//! The sensor front-end driver is chip-specific register code and lives
//! with the board support package, behind `SensorBus`.

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod power;
pub mod tone;
