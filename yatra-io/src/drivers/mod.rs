//! Hardware driver traits.
//!
//! All hardware interaction is synchronous request/response: each sweep,
//! move, and rotate command blocks until the device answers or the
//! caller's round-trip budget expires. Every blocking call receives the
//! budget explicitly; a timeout is fatal and reported
//! ([`Error::Timeout`](crate::Error::Timeout)), never retried: the
//! distance actually covered before a failure is authoritative and must
//! not be guessed.

pub mod stop_reason;

pub use stop_reason::StopReason;

use std::time::Duration;

use crate::error::Result;

/// Raw readings from one servo pass, index-aligned with the requested
/// pulse widths. A non-finite value marks a missed reading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepRaw {
    /// Raw IR channel readings.
    pub ir: Vec<f64>,
    /// Raw sonar channel readings.
    pub sonar: Vec<f64>,
}

/// What actually happened when a move command completed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Distance actually traveled in cm. Authoritative even on an early
    /// stop.
    pub distance: f64,
    /// Why the move ended.
    pub stop_reason: StopReason,
}

/// Range sensor pair behind the sweep servo.
pub trait SensorDriver: Send {
    /// Perform one sweep: position the servo at each pulse width in turn
    /// and sample both range channels. Answers not produced within
    /// `timeout` are [`Error::Timeout`](crate::Error::Timeout).
    ///
    /// The returned channels must be index-aligned with `pulse_widths`.
    fn sweep(&mut self, pulse_widths: &[f64], timeout: Duration) -> Result<SweepRaw>;
}

/// Drive motors and sweep servo.
pub trait ActuatorDriver: Send {
    /// Drive forward up to `distance` cm at the given speed. Blocks until
    /// the rover stops and reports what actually happened, or until
    /// `timeout` expires.
    fn drive(&mut self, distance: f64, speed: f64, timeout: Duration) -> Result<MoveOutcome>;

    /// Rotate in place by `delta_deg` (CCW positive). Blocks until
    /// acknowledged or until `timeout` expires.
    fn rotate(&mut self, delta_deg: f64, timeout: Duration) -> Result<()>;

    /// Position the sweep servo at a raw pulse width.
    fn set_servo(&mut self, pulse_width: f64, timeout: Duration) -> Result<()>;
}
