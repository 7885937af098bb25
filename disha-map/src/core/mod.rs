//! Fundamental types: points, poses, samples, and coordinate transforms.

pub mod point;
pub mod pose;
pub mod scan;
pub mod transform;

pub use point::{Channel, MapPoint, Point2D};
pub use pose::{Pose, PoseTracker, INITIAL_HEADING_DEG};
pub use scan::{MergedScan, PolarSample, ScanBatch};
