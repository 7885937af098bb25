//! Scan/move/rotate orchestration.
//!
//! The controller is a small state machine: every operation runs
//! `Idle -> Scanning|Moving|Rotating -> Idle`, and no two operations may
//! overlap. Before any reorientation (move or rotate) it runs the
//! finalize-for-reorientation protocol: invalidate the scanner, finalize
//! the map's volatile contours, and only THEN touch the pose. Scan data
//! and contours are valid only for the pose under which they were
//! captured, so the protocol must never run after the physical command.

use std::time::Duration;

use log::{info, warn};

use disha_map::core::scan::{PolarSample, ScanBatch};
use disha_map::map::{EnvironmentMap, RenderSink};
use disha_map::scanner::Scanner;

use crate::calibration::Converters;
use crate::config::RoverConfig;
use crate::connection::Handle;
use crate::drivers::{ActuatorDriver, SensorDriver};
use crate::error::{Error, Result};

/// Which operation the controller is currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Ready for the next operation.
    Idle,
    /// A sweep is in flight.
    Scanning,
    /// A move command is in flight.
    Moving,
    /// A rotate command is in flight.
    Rotating,
}

/// Orchestrates scanning, movement, and mapping against the hardware.
pub struct RoverController {
    config: RoverConfig,
    handle: Handle,
    response_timeout: Duration,
    converters: Converters,
    sensor: Box<dyn SensorDriver>,
    actuator: Box<dyn ActuatorDriver>,
    scanner: Scanner,
    map: EnvironmentMap,
    state: ControllerState,
}

impl RoverController {
    /// Create a controller.
    ///
    /// Resolves the configured connection once; an unusable session
    /// aborts construction.
    pub fn new(
        config: RoverConfig,
        converters: Converters,
        sensor: Box<dyn SensorDriver>,
        actuator: Box<dyn ActuatorDriver>,
        sink: Box<dyn RenderSink>,
    ) -> Result<Self> {
        let handle = config.hardware.connection().resolve()?;
        info!("rover controller attached to session '{}'", handle.name());
        let response_timeout = config.hardware.response_timeout();
        let map = EnvironmentMap::new(config.map, sink);
        Ok(Self {
            config,
            handle,
            response_timeout,
            converters,
            sensor,
            actuator,
            scanner: Scanner::new(),
            map,
            state: ControllerState::Idle,
        })
    }

    /// Current state. Externally this is `Idle` between operations.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Resolved hardware session.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// The environment map built so far.
    pub fn map(&self) -> &EnvironmentMap {
        &self.map
    }

    /// The sweep accumulator for the current orientation.
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Perform one sweep from `start_deg` to `end_deg`.
    ///
    /// The sweep runs ascending when `start_deg <= end_deg` and
    /// descending otherwise, one sample per whole degree. Raw readings
    /// pass through the calibration converters; a non-finite raw value
    /// becomes a gap sample.
    ///
    /// The two flags are independent: `accumulate` forwards the batch to
    /// the scanner, `project` forwards it to the environment map (in that
    /// order, so projection sees the batch in the merged view). When both
    /// are false the batch is returned to the caller instead.
    pub fn scan(
        &mut self,
        start_deg: i32,
        end_deg: i32,
        accumulate: bool,
        project: bool,
    ) -> Result<Option<ScanBatch>> {
        self.enter(ControllerState::Scanning)?;
        let result = self.scan_inner(start_deg, end_deg, accumulate, project);
        self.state = ControllerState::Idle;
        result
    }

    /// Perform one sweep using the configured default bounds.
    pub fn scan_default(&mut self, accumulate: bool, project: bool) -> Result<Option<ScanBatch>> {
        let (start, end) = (self.config.scan.start_deg, self.config.scan.end_deg);
        self.scan(start, end, accumulate, project)
    }

    /// Move forward, mapping whatever actually happened.
    ///
    /// Runs the finalize-for-reorientation protocol, issues the blocking
    /// move, applies the ACTUAL distance reported by the actuator, and
    /// records a danger if the rover stopped early.
    pub fn advance(&mut self, distance: f64, speed: f64) -> Result<()> {
        self.enter(ControllerState::Moving)?;
        let result = self.advance_inner(distance, speed);
        self.state = ControllerState::Idle;
        result
    }

    /// Rotate in place by `delta_deg` (CCW positive).
    pub fn rotate(&mut self, delta_deg: f64) -> Result<()> {
        self.enter(ControllerState::Rotating)?;
        let result = self.rotate_inner(delta_deg);
        self.state = ControllerState::Idle;
        result
    }

    /// Point the sweep servo at an angle without sampling.
    pub fn set_servo_angle(&mut self, angle_deg: f64) -> Result<()> {
        if self.state != ControllerState::Idle {
            return Err(Error::Busy("servo command during another operation"));
        }
        let pulse_width = self.converters.servo.convert(angle_deg);
        self.actuator.set_servo(pulse_width, self.response_timeout)
    }

    fn enter(&mut self, next: ControllerState) -> Result<()> {
        if self.state != ControllerState::Idle {
            return Err(Error::Busy("another operation is in flight"));
        }
        self.state = next;
        Ok(())
    }

    fn scan_inner(
        &mut self,
        start_deg: i32,
        end_deg: i32,
        accumulate: bool,
        project: bool,
    ) -> Result<Option<ScanBatch>> {
        let angles = angle_ladder(start_deg, end_deg);
        let pulse_widths: Vec<f64> = angles
            .iter()
            .map(|&a| self.converters.servo.convert(a))
            .collect();

        let raw = self.sensor.sweep(&pulse_widths, self.response_timeout)?;
        if raw.ir.len() != angles.len() || raw.sonar.len() != angles.len() {
            return Err(Error::InvalidResponse(format!(
                "sweep returned {} IR / {} sonar readings for {} angles",
                raw.ir.len(),
                raw.sonar.len(),
                angles.len()
            )));
        }

        let ir = calibrate_channel(&angles, &raw.ir, &self.converters.ir);
        let sonar = calibrate_channel(&angles, &raw.sonar, &self.converters.sonar);
        let batch = ScanBatch::new(self.scanner.generation(), ir, sonar);

        if !accumulate && !project {
            return Ok(Some(batch));
        }
        if accumulate {
            self.scanner.add_batch(batch.clone())?;
        }
        if project {
            self.map.add_scan(&batch, &self.scanner)?;
        }
        Ok(None)
    }

    fn advance_inner(&mut self, distance: f64, speed: f64) -> Result<()> {
        self.finalize_for_reorientation();

        let outcome = self.actuator.drive(distance, speed, self.response_timeout)?;
        self.map.advance(outcome.distance);

        if let Some(kind) = outcome.stop_reason.to_danger() {
            warn!(
                "move stopped early at {:.1}/{:.1} cm: {:?}",
                outcome.distance, distance, outcome.stop_reason
            );
            self.map.add_danger(kind);
        }
        Ok(())
    }

    fn rotate_inner(&mut self, delta_deg: f64) -> Result<()> {
        self.finalize_for_reorientation();

        self.actuator.rotate(delta_deg, self.response_timeout)?;
        self.map.rotate(delta_deg);
        Ok(())
    }

    /// Invalidate sweep state before the pose changes.
    ///
    /// Must complete strictly before the pose-changing step; this is the
    /// only cross-component ordering contract in the system.
    fn finalize_for_reorientation(&mut self) {
        self.scanner.invalidate();
        self.map.finalize_contours();
    }
}

/// Whole-degree angle sequence from `start` toward `end`, end exclusive.
fn angle_ladder(start_deg: i32, end_deg: i32) -> Vec<f64> {
    if start_deg <= end_deg {
        (start_deg..end_deg).map(f64::from).collect()
    } else {
        ((end_deg + 1)..=start_deg).rev().map(f64::from).collect()
    }
}

/// Convert one raw channel; non-finite readings become gaps.
fn calibrate_channel(
    angles: &[f64],
    raws: &[f64],
    curve: &crate::calibration::CalibrationCurve,
) -> Vec<PolarSample> {
    angles
        .iter()
        .zip(raws)
        .map(|(&angle, &raw)| {
            if raw.is_finite() {
                PolarSample::hit(angle, curve.convert(raw))
            } else {
                PolarSample::gap(angle)
            }
        })
        .collect()
}
