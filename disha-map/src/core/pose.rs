//! Robot pose and dead-reckoning pose tracker.
//!
//! The world frame is anchored at the robot's initial orientation: the
//! starting location is the origin and the robot initially faces "up"
//! (heading 90 degrees). Headings are measured in degrees,
//! counter-clockwise positive.

use super::point::Point2D;
use super::transform;

/// Heading at power-on: facing straight up in the world frame.
pub const INITIAL_HEADING_DEG: f64 = 90.0;

/// Global location and heading of the robot.
///
/// The pose is assumed constant for the duration of one sweep; the design
/// accepts that approximation. Headings are deliberately NOT normalized to
/// any canonical range: rotating by 45 from heading 90 yields 135, and
/// accumulated rotations may exceed 360.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// X location in cm.
    pub x: f64,
    /// Y location in cm.
    pub y: f64,
    /// Heading in degrees, CCW positive, unnormalized.
    pub heading_deg: f64,
}

impl Pose {
    /// Create a pose.
    #[inline]
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Self { x, y, heading_deg }
    }

    /// The pose at power-on: origin, facing up.
    #[inline]
    pub fn initial() -> Self {
        Self::new(0.0, 0.0, INITIAL_HEADING_DEG)
    }

    /// Location as a point.
    #[inline]
    pub fn location(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::initial()
    }
}

/// Owns the current pose; all mutation goes through [`advance`] and
/// [`rotate`].
///
/// [`advance`]: PoseTracker::advance
/// [`rotate`]: PoseTracker::rotate
#[derive(Clone, Debug, Default)]
pub struct PoseTracker {
    pose: Pose,
}

impl PoseTracker {
    /// Create a tracker at the initial pose.
    pub fn new() -> Self {
        Self {
            pose: Pose::initial(),
        }
    }

    /// Create a tracker at a specific pose.
    pub fn with_pose(pose: Pose) -> Self {
        Self { pose }
    }

    /// Current pose.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Translate the pose forward along the current heading.
    ///
    /// The robot cannot strafe, so the new location is the radial point at
    /// sweep angle 90 (straight ahead) and the given distance. Heading is
    /// unchanged.
    pub fn advance(&mut self, distance: f64) {
        let new_loc = transform::radial_to_world(&self.pose, 90.0, distance);
        self.pose.x = new_loc.x;
        self.pose.y = new_loc.y;
    }

    /// Rotate the heading by `delta_deg` (CCW positive, CW negative).
    ///
    /// The heading is not wrapped into any canonical range.
    pub fn rotate(&mut self, delta_deg: f64) {
        self.pose.heading_deg += delta_deg;
    }
}
