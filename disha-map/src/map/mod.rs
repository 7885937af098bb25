//! Persistent environment map: breadcrumbs, contours, point cloud, dangers.

pub mod environment;
pub mod events;

pub use environment::{EnvironmentMap, MapConfig};
pub use events::{ChannelSink, MapEvent, NullSink, RecordingSink, RenderSink};

use serde::{Deserialize, Serialize};

use crate::core::point::Point2D;

/// Marker of a past stop location. Append-only; one per completed move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Location at which the rover stopped, in world coordinates.
    pub location: Point2D,
    /// Display radius in cm (the robot's body radius).
    pub radius: f64,
}

/// Ordered polyline representing an object's inferred boundary.
///
/// Volatility is tracked by the map, not the contour itself: volatile
/// contours are wholesale replaced on each new scan, finalized contours
/// are append-only and never removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// World-frame polyline points.
    pub points: Vec<Point2D>,
}

impl Contour {
    /// Create a contour from a polyline.
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Whether the polyline is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Category of a hazard discovered while moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DangerKind {
    /// A bumper was pressed.
    Bump,
    /// A cliff sensor fired.
    Cliff,
    /// A wheel lost contact with the floor.
    WheelDrop,
    /// White boundary tape was detected.
    Tape,
    /// The actuator reported a stop code this build does not recognize.
    /// Surfaced explicitly rather than dropped.
    Unmapped(u8),
}

/// A hazard and the world location it was attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DangerEvent {
    /// What was detected.
    pub kind: DangerKind,
    /// Attributed world location.
    pub location: Point2D,
}
