//! Scripted devices for hardware-free testing.
//!
//! These drivers replay canned responses and record every command they
//! receive, so tests can assert on both what the controller asked for
//! and how it handled the answers. A scripted response latency larger
//! than the caller's round-trip budget yields [`Error::Timeout`] without
//! sleeping.

use std::collections::VecDeque;
use std::time::Duration;

use crate::connection::ConnectionSpec;
use crate::drivers::{ActuatorDriver, MoveOutcome, SensorDriver, StopReason, SweepRaw};
use crate::error::{Error, Result};

/// Sensor driver that replays a queue of canned sweeps.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    sweeps: VecDeque<SweepRaw>,
    latency: Duration,
    /// Pulse widths of every sweep requested so far.
    pub requests: Vec<Vec<f64>>,
}

impl ScriptedSensor {
    /// Create an empty scripted sensor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scripted sensor for the given session.
    pub fn connect(spec: ConnectionSpec) -> Result<Self> {
        spec.resolve()?;
        Ok(Self::new())
    }

    /// Queue a sweep response.
    pub fn push_sweep(&mut self, sweep: SweepRaw) {
        self.sweeps.push_back(sweep);
    }

    /// Simulated response latency for every subsequent request.
    pub fn set_latency(&mut self, latency: Duration) {
        self.latency = latency;
    }

    /// Queue a sweep response whose raw readings equal the requested
    /// index, on both channels. Handy with identity calibration.
    pub fn push_ramp(&mut self, len: usize) {
        let ramp: Vec<f64> = (0..len).map(|i| i as f64).collect();
        self.push_sweep(SweepRaw {
            ir: ramp.clone(),
            sonar: ramp,
        });
    }
}

impl SensorDriver for ScriptedSensor {
    fn sweep(&mut self, pulse_widths: &[f64], timeout: Duration) -> Result<SweepRaw> {
        self.requests.push(pulse_widths.to_vec());
        if self.latency > timeout {
            return Err(Error::Timeout);
        }
        let sweep = self
            .sweeps
            .pop_front()
            .ok_or_else(|| Error::Other("scripted sensor exhausted".to_string()))?;
        if sweep.ir.len() != pulse_widths.len() || sweep.sonar.len() != pulse_widths.len() {
            return Err(Error::InvalidResponse(format!(
                "scripted sweep has {} IR / {} sonar readings for {} pulse widths",
                sweep.ir.len(),
                sweep.sonar.len(),
                pulse_widths.len()
            )));
        }
        Ok(sweep)
    }
}

/// Command record kept by [`ScriptedActuator`].
#[derive(Clone, Debug, PartialEq)]
pub enum ActuatorCommand {
    /// A drive request: (distance, speed).
    Drive(f64, f64),
    /// A rotate request in degrees.
    Rotate(f64),
    /// A servo positioning request (pulse width).
    Servo(f64),
}

/// Actuator driver that replays canned move outcomes and records every
/// command.
#[derive(Debug, Default)]
pub struct ScriptedActuator {
    outcomes: VecDeque<MoveOutcome>,
    latency: Duration,
    /// Every command received, in order.
    pub commands: Vec<ActuatorCommand>,
}

impl ScriptedActuator {
    /// Create an actuator that completes every move at full distance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next drive command.
    pub fn push_outcome(&mut self, outcome: MoveOutcome) {
        self.outcomes.push_back(outcome);
    }

    /// Simulated response latency for every subsequent command.
    pub fn set_latency(&mut self, latency: Duration) {
        self.latency = latency;
    }

    fn check_timeout(&self, timeout: Duration) -> Result<()> {
        if self.latency > timeout {
            return Err(Error::Timeout);
        }
        Ok(())
    }
}

impl ActuatorDriver for ScriptedActuator {
    fn drive(&mut self, distance: f64, speed: f64, timeout: Duration) -> Result<MoveOutcome> {
        self.commands.push(ActuatorCommand::Drive(distance, speed));
        self.check_timeout(timeout)?;
        Ok(self.outcomes.pop_front().unwrap_or(MoveOutcome {
            distance,
            stop_reason: StopReason::FullDistance,
        }))
    }

    fn rotate(&mut self, delta_deg: f64, timeout: Duration) -> Result<()> {
        self.commands.push(ActuatorCommand::Rotate(delta_deg));
        self.check_timeout(timeout)
    }

    fn set_servo(&mut self, pulse_width: f64, timeout: Duration) -> Result<()> {
        self.commands.push(ActuatorCommand::Servo(pulse_width));
        self.check_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_sensor_replays_in_order() {
        let mut sensor = ScriptedSensor::new();
        sensor.push_sweep(SweepRaw {
            ir: vec![1.0],
            sonar: vec![2.0],
        });
        sensor.push_sweep(SweepRaw {
            ir: vec![3.0],
            sonar: vec![4.0],
        });

        let first = sensor.sweep(&[0.5], Duration::from_secs(1)).unwrap();
        assert_eq!(first.ir, vec![1.0]);
        let second = sensor.sweep(&[0.5], Duration::from_secs(1)).unwrap();
        assert_eq!(second.sonar, vec![4.0]);
        assert_eq!(sensor.requests.len(), 2);
    }

    #[test]
    fn test_scripted_sensor_exhaustion_is_an_error() {
        let mut sensor = ScriptedSensor::new();
        assert!(matches!(
            sensor.sweep(&[0.5], Duration::from_secs(1)),
            Err(Error::Other(_))
        ));
    }

    #[test]
    fn test_latency_past_the_budget_times_out() {
        let mut sensor = ScriptedSensor::new();
        sensor.push_ramp(3);
        sensor.set_latency(Duration::from_millis(500));
        assert!(matches!(
            sensor.sweep(&[0.5, 0.6, 0.7], Duration::from_millis(100)),
            Err(Error::Timeout)
        ));

        let mut actuator = ScriptedActuator::new();
        actuator.set_latency(Duration::from_millis(500));
        assert!(matches!(
            actuator.drive(300.0, 90.0, Duration::from_millis(100)),
            Err(Error::Timeout)
        ));
        assert!(matches!(
            actuator.rotate(90.0, Duration::from_millis(100)),
            Err(Error::Timeout)
        ));
    }

    #[test]
    fn test_scripted_sensor_length_mismatch_rejected() {
        let mut sensor = ScriptedSensor::new();
        sensor.push_sweep(SweepRaw {
            ir: vec![1.0, 2.0],
            sonar: vec![1.0, 2.0],
        });
        assert!(matches!(
            sensor.sweep(&[0.5], Duration::from_secs(1)),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_actuator_defaults_to_full_distance() {
        let mut actuator = ScriptedActuator::new();
        let outcome = actuator.drive(300.0, 90.0, Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.distance, 300.0);
        assert_eq!(outcome.stop_reason, StopReason::FullDistance);
        assert_eq!(actuator.commands.len(), 1);
    }

    #[test]
    fn test_actuator_replays_queued_outcome() {
        let mut actuator = ScriptedActuator::new();
        actuator.push_outcome(MoveOutcome {
            distance: 120.0,
            stop_reason: StopReason::LeftBumper,
        });

        let outcome = actuator.drive(300.0, 90.0, Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.distance, 120.0);
        assert_eq!(outcome.stop_reason, StopReason::LeftBumper);
    }
}
