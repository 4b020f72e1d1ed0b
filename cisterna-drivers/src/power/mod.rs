//! Power rail implementations

pub mod rail;

pub use rail::{SwitchedRail, DEFAULT_STABILIZE_MS};
