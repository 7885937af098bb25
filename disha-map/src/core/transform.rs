//! Radial-to-world coordinate transforms.
//!
//! A sweep measures angles relative to the robot's right side: angle 0
//! points to the right of the robot and angle 90 straight ahead. Headings
//! are relative to the world X-axis. The `- 90` offset below reconciles the
//! two conventions so that a 0-180 degree sweep spans the half-plane in
//! front of the robot.
//!
//! These functions are pure and side-effect free; they are safe to call
//! concurrently from multiple readers.

use super::point::Point2D;
use super::pose::Pose;
use crate::error::{MapError, Result};

/// Map a single robot-relative radial sample into the world frame.
///
/// # Arguments
/// * `pose` - Pose under which the sample was captured
/// * `angle_deg` - Sweep angle in degrees (90 = straight ahead)
/// * `radius` - Measured distance in cm
#[inline]
pub fn radial_to_world(pose: &Pose, angle_deg: f64, radius: f64) -> Point2D {
    let theta = (angle_deg - 90.0 + pose.heading_deg).to_radians();
    Point2D::new(
        radius * theta.cos() + pose.x,
        radius * theta.sin() + pose.y,
    )
}

/// Vectorized form of [`radial_to_world`].
///
/// # Errors
/// Returns [`MapError::DimensionMismatch`] when the slices differ in
/// length. Caller error; fail fast, no retry.
pub fn radial_batch_to_world(pose: &Pose, angles: &[f64], radii: &[f64]) -> Result<Vec<Point2D>> {
    if angles.len() != radii.len() {
        return Err(MapError::DimensionMismatch {
            angles: angles.len(),
            radii: radii.len(),
        });
    }

    Ok(angles
        .iter()
        .zip(radii)
        .map(|(&angle, &radius)| radial_to_world(pose, angle, radius))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_ahead_at_initial_heading() {
        // Heading 90 (facing up): a return at sweep angle 90 lands directly
        // above the robot.
        let pose = Pose::new(0.0, 0.0, 90.0);
        let p = radial_to_world(&pose, 90.0, 50.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_zero_is_to_the_right() {
        let pose = Pose::new(0.0, 0.0, 90.0);
        let p = radial_to_world(&pose, 0.0, 50.0);
        assert_relative_eq!(p.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_translation_offset() {
        let pose = Pose::new(10.0, -20.0, 90.0);
        let p = radial_to_world(&pose, 90.0, 5.0);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, -15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heading_rotates_the_sweep() {
        // Heading 0: "straight ahead" is along +X.
        let pose = Pose::new(0.0, 0.0, 0.0);
        let p = radial_to_world(&pose, 90.0, 50.0);
        assert_relative_eq!(p.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let pose = Pose::new(3.0, 4.0, 120.0);
        let angles = [0.0, 45.0, 90.0, 135.0];
        let radii = [10.0, 20.0, 30.0, 40.0];

        let points = radial_batch_to_world(&pose, &angles, &radii).unwrap();
        assert_eq!(points.len(), 4);
        for (i, p) in points.iter().enumerate() {
            let expected = radial_to_world(&pose, angles[i], radii[i]);
            assert_relative_eq!(p.x, expected.x, epsilon = 1e-12);
            assert_relative_eq!(p.y, expected.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_batch_dimension_mismatch() {
        let pose = Pose::initial();
        let err = radial_batch_to_world(&pose, &[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            MapError::DimensionMismatch {
                angles: 2,
                radii: 1
            }
        ));
    }

    #[test]
    fn test_batch_empty() {
        let pose = Pose::initial();
        let points = radial_batch_to_world(&pose, &[], &[]).unwrap();
        assert!(points.is_empty());
    }
}
