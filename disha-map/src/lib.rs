//! # Disha-Map: Sweep-Based Environment Mapping
//!
//! A mapping library for a mobile robot that discovers its surroundings
//! through radial distance sweeps on two independent range channels (IR
//! and sonar). The robot dead-reckons its pose, projects each sweep's
//! robot-relative polar samples into a persistent world-frame point
//! cloud, and segments accumulated angular returns into candidate
//! discrete objects.
//!
//! ## Quick Start
//!
//! ```rust
//! use disha_map::core::scan::{PolarSample, ScanBatch};
//! use disha_map::map::{EnvironmentMap, MapConfig, NullSink};
//! use disha_map::scanner::Scanner;
//!
//! let mut map = EnvironmentMap::new(MapConfig::default(), Box::new(NullSink));
//! let mut scanner = Scanner::new();
//!
//! // One sweep batch: an object between two missed readings.
//! let ir = vec![
//!     PolarSample::gap(10.0),
//!     PolarSample::hit(20.0, 50.0),
//!     PolarSample::hit(30.0, 52.0),
//!     PolarSample::hit(40.0, 51.0),
//!     PolarSample::gap(50.0),
//! ];
//! let batch = ScanBatch::new(scanner.generation(), ir.clone(), ir);
//!
//! scanner.add_batch(batch.clone()).unwrap();
//! map.add_scan(&batch, &scanner).unwrap();
//! assert_eq!(map.volatile_contours().len(), 1);
//!
//! // Reorientation: finalize first, then change the pose.
//! scanner.invalidate();
//! map.finalize_contours();
//! map.advance(100.0);
//! ```
//!
//! ## Coordinate Frame
//!
//! The world frame is anchored at the robot's initial orientation: the
//! starting location is the origin and the initial heading is 90 degrees
//! ("up"). Sweep angles are measured from the robot's right side, so
//! angle 90 is straight ahead. All distances are in cm, angles in
//! degrees, rotation CCW positive.
//!
//! ## Architecture
//!
//! - [`core`]: points, poses, polar samples, coordinate transforms
//! - [`scanner`]: generation-tagged sweep accumulator
//! - [`segmentation`]: angular clustering into object candidates
//! - [`map`]: the environment map and its render event stream
//!
//! ## Data Flow
//!
//! ```text
//!   ScanBatch ──► Scanner (accumulate, merge) ──► ObjectSegmenter
//!        │                                             │
//!        │ project at current pose                     │ clusters
//!        ▼                                             ▼
//!   EnvironmentMap (point cloud, volatile contours, breadcrumbs)
//!        │
//!        ▼
//!   MapEvent stream ──► renderer (pure consumer)
//! ```
//!
//! The one cross-component ordering contract: volatile contours must be
//! finalized, and the scanner invalidated, strictly BEFORE any pose
//! mutation. Projections are only meaningful under the pose they were
//! computed at.

pub mod core;
pub mod error;
pub mod map;
pub mod scanner;
pub mod segmentation;

pub use error::{MapError, Result};

// Re-export main types at crate root
pub use crate::core::{Channel, MapPoint, Point2D, PolarSample, Pose, PoseTracker, ScanBatch};
pub use map::{
    Breadcrumb, Contour, DangerEvent, DangerKind, EnvironmentMap, MapConfig, MapEvent, NullSink,
    RecordingSink, RenderSink,
};
pub use scanner::Scanner;
pub use segmentation::{ContourFit, ObjectCluster, ObjectSegmenter, SegmenterConfig, SonarMatch};
