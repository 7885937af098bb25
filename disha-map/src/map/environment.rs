//! The environment map: everything the rover has discovered so far.
//!
//! Scan data and contours are only meaningful under the pose that was
//! active when they were computed. The one cross-component ordering
//! contract in the system follows from that: [`finalize_contours`] must
//! complete strictly before any subsequent pose mutation. The controller
//! enforces the ordering; this type enforces the bookkeeping.
//!
//! [`finalize_contours`]: EnvironmentMap::finalize_contours

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::events::{MapEvent, RenderSink};
use super::{Breadcrumb, Contour, DangerEvent, DangerKind};
use crate::core::point::{Channel, MapPoint, Point2D};
use crate::core::pose::{Pose, PoseTracker};
use crate::core::scan::{PolarSample, ScanBatch};
use crate::core::transform;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::segmentation::{ContourFit, ObjectSegmenter, SegmenterConfig};

/// Configuration for the environment map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Display radius of a breadcrumb in cm (the robot's body radius).
    /// Default: 16.25
    pub breadcrumb_radius: f64,

    /// Forward offset from the pose location at which dangers are placed,
    /// in cm. Hazard sensors sit at the front edge of the body.
    /// Default: 16.25
    pub danger_offset: f64,

    /// Segmentation parameters.
    pub segmenter: SegmenterConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            breadcrumb_radius: 16.25,
            danger_offset: 16.25,
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl MapConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the breadcrumb radius.
    pub fn with_breadcrumb_radius(mut self, value: f64) -> Self {
        self.breadcrumb_radius = value;
        self
    }

    /// Builder-style setter for the danger placement offset.
    pub fn with_danger_offset(mut self, value: f64) -> Self {
        self.danger_offset = value;
        self
    }

    /// Builder-style setter for the segmenter configuration.
    pub fn with_segmenter(mut self, value: SegmenterConfig) -> Self {
        self.segmenter = value;
        self
    }
}

/// Owns the discovered state of the world and the rover's pose within it.
pub struct EnvironmentMap {
    config: MapConfig,
    tracker: PoseTracker,
    segmenter: ObjectSegmenter,
    fitter: Option<Box<dyn ContourFit>>,
    sink: Box<dyn RenderSink>,

    breadcrumbs: Vec<Breadcrumb>,
    finalized: Vec<Contour>,
    volatile: Vec<Contour>,
    cloud: Vec<MapPoint>,
    dangers: Vec<DangerEvent>,
}

impl EnvironmentMap {
    /// Create a map at the initial pose with the given render sink.
    pub fn new(config: MapConfig, sink: Box<dyn RenderSink>) -> Self {
        let segmenter = ObjectSegmenter::new(config.segmenter);
        Self {
            config,
            tracker: PoseTracker::new(),
            segmenter,
            fitter: None,
            sink,
            breadcrumbs: Vec::new(),
            finalized: Vec::new(),
            volatile: Vec::new(),
            cloud: Vec::new(),
            dangers: Vec::new(),
        }
    }

    /// Install a contour fitter. Without one, volatile contours are the
    /// raw projected point ranges of each cluster.
    pub fn with_fitter(mut self, fitter: Box<dyn ContourFit>) -> Self {
        self.fitter = Some(fitter);
        self
    }

    /// Current pose.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.tracker.pose()
    }

    /// Recorded stop locations, oldest first.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Finalized contours. Append-only; never removed.
    pub fn contours(&self) -> &[Contour] {
        &self.finalized
    }

    /// Contours still subject to replacement by the next scan.
    pub fn volatile_contours(&self) -> &[Contour] {
        &self.volatile
    }

    /// Accumulated world-frame point cloud.
    pub fn point_cloud(&self) -> &[MapPoint] {
        &self.cloud
    }

    /// Recorded hazards, oldest first.
    pub fn dangers(&self) -> &[DangerEvent] {
        &self.dangers
    }

    /// Project a sweep batch into the map and refresh volatile contours.
    ///
    /// Both channels of `batch` are projected at the current pose and
    /// appended to the point cloud. Segmentation then runs over the
    /// `scanner`'s full merged view (not just this batch), and the
    /// volatile contour set is wholesale replaced by the new derivation.
    pub fn add_scan(&mut self, batch: &ScanBatch, scanner: &Scanner) -> Result<()> {
        let pose = self.tracker.pose();

        let mut points = self.project_channel(&pose, &batch.ir, Channel::Ir)?;
        points.extend(self.project_channel(&pose, &batch.sonar, Channel::Sonar)?);

        self.cloud.extend_from_slice(&points);
        self.sink.publish(&MapEvent::ScanPointsAdded(points));

        self.rebuild_volatile_contours(&pose, scanner)?;
        Ok(())
    }

    /// Move all volatile contours into the finalized set.
    ///
    /// Idempotent: with no intervening scan a second call is a no-op and
    /// publishes nothing.
    pub fn finalize_contours(&mut self) {
        if self.volatile.is_empty() {
            return;
        }
        info!("finalizing {} contour(s)", self.volatile.len());
        self.finalized.append(&mut self.volatile);
        self.sink.publish(&MapEvent::ContoursFinalized);
    }

    /// Record a breadcrumb at the current location, then translate the
    /// pose forward by `distance`.
    ///
    /// The breadcrumb is always recorded at the PRE-move location,
    /// exactly one per call.
    pub fn advance(&mut self, distance: f64) {
        let crumb = Breadcrumb {
            location: self.tracker.pose().location(),
            radius: self.config.breadcrumb_radius,
        };
        self.breadcrumbs.push(crumb);
        self.sink.publish(&MapEvent::BreadcrumbAdded(crumb));

        self.tracker.advance(distance);
        self.sink.publish(&MapEvent::PoseChanged(self.tracker.pose()));
    }

    /// Rotate the pose by `delta_deg`. No breadcrumb is recorded.
    pub fn rotate(&mut self, delta_deg: f64) {
        self.tracker.rotate(delta_deg);
        self.sink.publish(&MapEvent::PoseChanged(self.tracker.pose()));
    }

    /// Record a hazard of the given kind.
    ///
    /// The hazard is attributed to the point directly ahead of the
    /// current pose at the configured sensor mount offset.
    pub fn add_danger(&mut self, kind: DangerKind) {
        let pose = self.tracker.pose();
        let location = transform::radial_to_world(&pose, 90.0, self.config.danger_offset);
        let event = DangerEvent { kind, location };
        debug!("danger {kind:?} at ({:.1}, {:.1})", location.x, location.y);
        self.dangers.push(event);
        self.sink.publish(&MapEvent::DangerAdded(event));
    }

    /// Project the real returns of one channel at the given pose.
    fn project_channel(
        &self,
        pose: &Pose,
        samples: &[PolarSample],
        channel: Channel,
    ) -> Result<Vec<MapPoint>> {
        let mut angles = Vec::with_capacity(samples.len());
        let mut radii = Vec::with_capacity(samples.len());
        for sample in samples {
            if let Some(radius) = sample.radius {
                angles.push(sample.angle_deg);
                radii.push(radius);
            }
        }

        let points = transform::radial_batch_to_world(pose, &angles, &radii)?;
        Ok(points
            .into_iter()
            .map(|p| MapPoint::new(p, channel))
            .collect())
    }

    /// Re-derive the volatile contour set from the scanner's merged view.
    ///
    /// The previous volatile set is discarded entirely; volatile contours
    /// are never merged with their predecessors.
    fn rebuild_volatile_contours(&mut self, pose: &Pose, scanner: &Scanner) -> Result<()> {
        let merged = scanner.merge();
        let clusters = self.segmenter.segment(&merged);

        let mut contours = Vec::with_capacity(clusters.len());
        for cluster in &clusters {
            let contour = match &self.fitter {
                Some(fitter) => match fitter.fit(cluster, pose) {
                    Ok(contour) => contour,
                    Err(_) => self.raw_contour(pose, cluster)?,
                },
                None => self.raw_contour(pose, cluster)?,
            };
            contours.push(contour);
        }

        self.volatile = contours;
        for contour in &self.volatile {
            self.sink.publish(&MapEvent::ContourAdded {
                contour: contour.clone(),
                volatile: true,
            });
        }
        Ok(())
    }

    /// Fallback contour: the cluster's projected IR returns as a polyline.
    fn raw_contour(
        &self,
        pose: &Pose,
        cluster: &crate::segmentation::ObjectCluster,
    ) -> Result<Contour> {
        let points = self.project_channel(pose, &cluster.ir, Channel::Ir)?;
        Ok(Contour::new(
            points.iter().map(MapPoint::position).collect::<Vec<Point2D>>(),
        ))
    }
}

impl std::fmt::Debug for EnvironmentMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentMap")
            .field("pose", &self.tracker.pose())
            .field("breadcrumbs", &self.breadcrumbs.len())
            .field("finalized", &self.finalized.len())
            .field("volatile", &self.volatile.len())
            .field("cloud_points", &self.cloud.len())
            .field("dangers", &self.dangers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scan::PolarSample;
    use approx::assert_relative_eq;

    fn object_batch(generation: u64) -> ScanBatch {
        // One object between gaps at 10 and 50 degrees.
        let ir = vec![
            PolarSample::gap(10.0),
            PolarSample::hit(20.0, 50.0),
            PolarSample::hit(30.0, 52.0),
            PolarSample::hit(40.0, 51.0),
            PolarSample::gap(50.0),
        ];
        let sonar = ir.clone();
        ScanBatch::new(generation, ir, sonar)
    }

    fn map() -> EnvironmentMap {
        EnvironmentMap::new(MapConfig::default(), Box::new(super::super::NullSink))
    }

    #[test]
    fn test_add_scan_projects_both_channels() {
        let mut map = map();
        let mut scanner = Scanner::new();
        let batch = object_batch(0);
        scanner.add_batch(batch.clone()).unwrap();

        map.add_scan(&batch, &scanner).unwrap();

        // Three real returns per channel.
        assert_eq!(map.point_cloud().len(), 6);
        let ir_points = map
            .point_cloud()
            .iter()
            .filter(|p| p.channel == Channel::Ir)
            .count();
        assert_eq!(ir_points, 3);
    }

    #[test]
    fn test_add_scan_replaces_volatile_contours() {
        let mut map = map();
        let mut scanner = Scanner::new();

        let batch = object_batch(0);
        scanner.add_batch(batch.clone()).unwrap();
        map.add_scan(&batch, &scanner).unwrap();
        assert_eq!(map.volatile_contours().len(), 1);
        let first = map.volatile_contours()[0].clone();

        // A second identical batch doubles the merged samples but the
        // volatile set is replaced, never extended.
        let batch2 = object_batch(0);
        scanner.add_batch(batch2.clone()).unwrap();
        map.add_scan(&batch2, &scanner).unwrap();
        assert_eq!(map.volatile_contours().len(), 1);
        assert_ne!(map.volatile_contours()[0], first);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut map = map();
        let mut scanner = Scanner::new();
        let batch = object_batch(0);
        scanner.add_batch(batch.clone()).unwrap();
        map.add_scan(&batch, &scanner).unwrap();

        map.finalize_contours();
        assert_eq!(map.contours().len(), 1);
        assert!(map.volatile_contours().is_empty());

        map.finalize_contours();
        assert_eq!(map.contours().len(), 1);
    }

    #[test]
    fn test_advance_records_breadcrumb_at_pre_move_location() {
        let mut map = map();
        map.advance(100.0);

        assert_eq!(map.breadcrumbs().len(), 1);
        let crumb = map.breadcrumbs()[0];
        assert_relative_eq!(crumb.location.x, 0.0);
        assert_relative_eq!(crumb.location.y, 0.0);
        assert_relative_eq!(crumb.radius, 16.25);

        let pose = map.pose();
        assert_relative_eq!(pose.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pose.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_updates_heading_only() {
        let mut map = map();
        map.rotate(45.0);
        assert_relative_eq!(map.pose().heading_deg, 135.0);
        assert!(map.breadcrumbs().is_empty());
    }

    #[test]
    fn test_danger_placed_ahead_of_pose() {
        let mut map = map();
        map.add_danger(DangerKind::Bump);

        let danger = map.dangers()[0];
        assert_eq!(danger.kind, DangerKind::Bump);
        // Facing up from the origin with a 16.25 offset.
        assert_relative_eq!(danger.location.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(danger.location.y, 16.25, epsilon = 1e-9);
    }

    #[test]
    fn test_segmentation_uses_merged_view_not_batch() {
        let mut map = map();
        let mut scanner = Scanner::new();

        // Split one object across two batches; neither alone is wide
        // enough, but the merged view is.
        let a = ScanBatch::new(
            0,
            vec![PolarSample::hit(20.0, 50.0), PolarSample::hit(22.0, 50.0)],
            vec![PolarSample::hit(20.0, 50.0), PolarSample::hit(22.0, 50.0)],
        );
        let b = ScanBatch::new(
            0,
            vec![PolarSample::hit(24.0, 50.0), PolarSample::hit(30.0, 50.0)],
            vec![PolarSample::hit(24.0, 50.0), PolarSample::hit(30.0, 50.0)],
        );

        scanner.add_batch(a.clone()).unwrap();
        map.add_scan(&a, &scanner).unwrap();
        assert!(map.volatile_contours().is_empty()); // 2 deg span: noise

        scanner.add_batch(b.clone()).unwrap();
        map.add_scan(&b, &scanner).unwrap();
        assert_eq!(map.volatile_contours().len(), 1); // 10 deg across batches
        assert_eq!(map.volatile_contours()[0].points.len(), 4);
    }
}
