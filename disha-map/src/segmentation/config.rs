//! Configuration for angular object segmentation.

use serde::{Deserialize, Serialize};

/// How the sonar sub-range for an IR-derived cluster is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SonarMatch {
    /// Reuse the IR index range directly. Requires the capture side to
    /// guarantee that both channels sample the same angles in the same
    /// order.
    #[default]
    ByIndex,
    /// Re-match the cluster bounds to the nearest sonar angles. Use this
    /// when the channels can diverge in sampled angles.
    ByNearestAngle,
}

/// Configuration for the angular segmenter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Minimum angular span for a run to be emitted as an object.
    /// Runs spanning this many degrees or fewer are discarded as noise.
    /// Default: 3.0
    pub min_width_deg: f64,

    /// Sonar sub-range selection strategy.
    /// Default: by index (channels assumed angle-aligned)
    pub sonar_match: SonarMatch,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_width_deg: 3.0,
            sonar_match: SonarMatch::ByIndex,
        }
    }
}

impl SegmenterConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the minimum cluster width.
    pub fn with_min_width_deg(mut self, value: f64) -> Self {
        self.min_width_deg = value;
        self
    }

    /// Builder-style setter for the sonar matching strategy.
    pub fn with_sonar_match(mut self, value: SonarMatch) -> Self {
        self.sonar_match = value;
        self
    }
}
