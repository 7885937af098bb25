//! Pluggable contour fitting.
//!
//! Turning a cluster of radial returns into a smooth object boundary is an
//! open extension point: no fitter ships with this crate. When no fitter
//! is installed the environment map falls back to the raw projected point
//! range of each cluster.

use super::segmenter::ObjectCluster;
use crate::core::pose::Pose;
use crate::map::Contour;

/// Returned by a fitter that cannot fit the given cluster.
#[derive(Debug, thiserror::Error)]
#[error("contour fitting unsupported for this cluster")]
pub struct FitUnsupported;

/// Fits an object cluster into a boundary polyline.
///
/// Implementations receive the pose under which the cluster's samples
/// were captured and must produce a world-frame polyline.
pub trait ContourFit: Send {
    /// Fit a cluster, or report that this fitter cannot handle it.
    fn fit(&self, cluster: &ObjectCluster, pose: &Pose) -> Result<Contour, FitUnsupported>;
}
