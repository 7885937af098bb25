//! Cartesian point types for the world frame.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in world coordinates (cm).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in cm.
    pub x: f64,
    /// Y coordinate in cm.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (*other - *self).norm()
    }

    /// Euclidean norm (distance from origin).
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Which range channel produced a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Infrared rangefinder.
    Ir,
    /// Ultrasonic rangefinder.
    Sonar,
}

/// A projected scan return in the world frame, tagged with its source channel.
///
/// Immutable once produced: projections are only meaningful under the pose
/// that was active when they were computed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// X coordinate in cm.
    pub x: f64,
    /// Y coordinate in cm.
    pub y: f64,
    /// Source range channel.
    pub channel: Channel,
}

impl MapPoint {
    /// Create a map point from a world-frame point and its source channel.
    #[inline]
    pub fn new(point: Point2D, channel: Channel) -> Self {
        Self {
            x: point.x,
            y: point.y,
            channel,
        }
    }

    /// Position as a plain point.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}
