//! Collaborator traits
//!
//! These traits define the interface between the decision engine and
//! the hardware-facing layers it drives. The sensor register protocol,
//! tone PWM generation, raw button edge detection, and storage cells
//! all live behind these seams.

pub mod button;
pub mod power;
pub mod sensor;
pub mod storage;
pub mod timer;
pub mod tone;

pub use button::{ButtonEvent, ButtonInput};
pub use power::PowerRail;
pub use sensor::{BusError, ChannelReading, SensorBus, SensorChannel};
pub use storage::{ConfigStorage, StorageError};
pub use timer::WakeTimer;
pub use tone::{BeepPattern, ToneOutput};
