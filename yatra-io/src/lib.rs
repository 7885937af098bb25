//! YatraIO - Hardware abstraction and control for a mapping rover
//!
//! This library sits between the mapping core ([`disha_map`]) and the
//! rover hardware. It owns sensor calibration, the hardware session,
//! the driver traits real transports implement, and the controller
//! that orchestrates scan/move/rotate operations against the map.
//!
//! ## Layout
//!
//! - [`drivers`]: the [`SensorDriver`] and [`ActuatorDriver`] traits
//!   plus the stop-reason wire codes reported by the motor firmware
//! - [`devices`]: scripted driver implementations for hardware-free
//!   testing
//! - [`calibration`]: piecewise-linear raw-to-physical conversion
//! - [`controller`]: the [`RoverController`] state machine
//!
//! [`SensorDriver`]: drivers::SensorDriver
//! [`ActuatorDriver`]: drivers::ActuatorDriver

pub mod calibration;
pub mod config;
pub mod connection;
pub mod controller;
pub mod devices;
pub mod drivers;
pub mod error;

// Re-export commonly used types
pub use calibration::{CalibrationCurve, Converters};
pub use config::RoverConfig;
pub use connection::{ConnectionSpec, Handle};
pub use controller::{ControllerState, RoverController};
pub use drivers::{MoveOutcome, StopReason, SweepRaw};
pub use error::{Error, Result};
