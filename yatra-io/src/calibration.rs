//! Calibration conversion between raw sensor units and physical units.
//!
//! Each sensor ships with an empirically measured curve: a table of
//! (raw reading, physical value) breakpoints. Conversion interpolates
//! linearly between breakpoints and follows the end segments beyond the
//! measured range.
//! Loading curves from files is a collaborator concern; this module only
//! consumes in-memory breakpoint tables.

use crate::error::{Error, Result};

/// A monotonic breakpoint table with linear interpolation.
#[derive(Clone, Debug)]
pub struct CalibrationCurve {
    /// (raw, value) pairs, strictly increasing in raw.
    breakpoints: Vec<(f64, f64)>,
}

impl CalibrationCurve {
    /// Build a curve from breakpoints.
    ///
    /// # Errors
    /// [`Error::Calibration`] if fewer than two breakpoints are given or
    /// the raw axis is not strictly increasing. Calibration failures are
    /// fatal at construction; they abort startup.
    pub fn from_breakpoints(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::Calibration(format!(
                "need at least 2 breakpoints, got {}",
                points.len()
            )));
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(Error::Calibration(format!(
                    "raw axis must be strictly increasing ({} then {})",
                    pair[0].0, pair[1].0
                )));
            }
        }
        Ok(Self {
            breakpoints: points.to_vec(),
        })
    }

    /// A pass-through curve. Useful for simulation and tests.
    pub fn identity() -> Self {
        Self {
            breakpoints: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    /// Convert one raw reading.
    ///
    /// Readings outside the measured range follow the end segments
    /// linearly rather than clamping to the boundary value.
    pub fn convert(&self, raw: f64) -> f64 {
        let pts = &self.breakpoints;
        let n = pts.len();

        // Pick the segment: first one whose right end is at or past `raw`,
        // extrapolating from the end segments outside the table.
        let seg = if raw <= pts[0].0 {
            0
        } else if raw >= pts[n - 1].0 {
            n - 2
        } else {
            pts.partition_point(|p| p.0 < raw).saturating_sub(1)
        };

        let (x0, y0) = pts[seg];
        let (x1, y1) = pts[seg + 1];
        y0 + (raw - x0) * (y1 - y0) / (x1 - x0)
    }

    /// Convert a slice of raw readings.
    pub fn convert_all(&self, raws: &[f64]) -> Vec<f64> {
        raws.iter().map(|&r| self.convert(r)).collect()
    }
}

/// The three calibrated converters the rover needs: IR raw -> cm,
/// sonar raw -> cm, and servo target angle (deg) -> pulse width.
#[derive(Clone, Debug)]
pub struct Converters {
    /// IR rangefinder raw reading to distance in cm.
    pub ir: CalibrationCurve,
    /// Sonar raw reading to distance in cm.
    pub sonar: CalibrationCurve,
    /// Servo target angle in degrees to pulse width.
    pub servo: CalibrationCurve,
}

impl Converters {
    /// Pass-through converters for simulation and tests.
    pub fn identity() -> Self {
        Self {
            ir: CalibrationCurve::identity(),
            sonar: CalibrationCurve::identity(),
            servo: CalibrationCurve::identity(),
        }
    }
}
