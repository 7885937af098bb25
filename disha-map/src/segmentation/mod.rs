//! Angular object segmentation.

pub mod config;
pub mod fit;
pub mod segmenter;

pub use config::{SegmenterConfig, SonarMatch};
pub use fit::{ContourFit, FitUnsupported};
pub use segmenter::{ObjectCluster, ObjectSegmenter};
