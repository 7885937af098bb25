//! Polar scan samples, sweep batches, and merged scans.
//!
//! One servo pass produces a [`ScanBatch`]: two index-aligned channels of
//! [`PolarSample`] captured under a single fixed pose. Batches accumulate
//! in the [`Scanner`](crate::scanner::Scanner) until the next
//! reorientation, at which point the merged view is discarded.

use serde::{Deserialize, Serialize};

use super::point::Channel;

/// One radial distance reading.
///
/// A `radius` of `None` marks a missed reading ("no-return"). Gaps break
/// clusters during segmentation and are skipped when projecting points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    /// Sweep angle in degrees.
    pub angle_deg: f64,
    /// Measured distance in cm, or `None` for a missed reading.
    pub radius: Option<f64>,
}

impl PolarSample {
    /// A sample with a real return.
    #[inline]
    pub fn hit(angle_deg: f64, radius: f64) -> Self {
        Self {
            angle_deg,
            radius: Some(radius),
        }
    }

    /// A missed reading.
    #[inline]
    pub fn gap(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            radius: None,
        }
    }

    /// Whether this sample is a missed reading.
    #[inline]
    pub fn is_gap(&self) -> bool {
        self.radius.is_none()
    }
}

/// Samples from one servo pass, captured under one fixed pose.
///
/// The two channels are index-aligned by capture order: `ir[i]` and
/// `sonar[i]` were measured at the same servo position. The batch carries
/// the scanner generation it was captured under so that data from a stale
/// orientation can be rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanBatch {
    /// Scanner generation at capture time.
    pub generation: u64,
    /// Infrared channel samples, in capture order.
    pub ir: Vec<PolarSample>,
    /// Sonar channel samples, in capture order.
    pub sonar: Vec<PolarSample>,
}

impl ScanBatch {
    /// Create a batch.
    pub fn new(generation: u64, ir: Vec<PolarSample>, sonar: Vec<PolarSample>) -> Self {
        Self {
            generation,
            ir,
            sonar,
        }
    }

    /// Samples for one channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> &[PolarSample] {
        match channel {
            Channel::Ir => &self.ir,
            Channel::Sonar => &self.sonar,
        }
    }

    /// Number of servo positions in this batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.ir.len()
    }

    /// Whether the batch holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ir.is_empty()
    }
}

/// Angle-sorted concatenation of all batches since the last reorientation.
///
/// Each channel is sorted ascending by angle with a stable sort, so equal
/// angles keep their original insertion order.
#[derive(Clone, Debug, Default)]
pub struct MergedScan {
    /// Infrared channel, angle-sorted.
    pub ir: Vec<PolarSample>,
    /// Sonar channel, angle-sorted.
    pub sonar: Vec<PolarSample>,
}

impl MergedScan {
    /// Samples for one channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> &[PolarSample] {
        match channel {
            Channel::Ir => &self.ir,
            Channel::Sonar => &self.sonar,
        }
    }

    /// Whether both channels are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ir.is_empty() && self.sonar.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_constructors() {
        let hit = PolarSample::hit(45.0, 12.5);
        assert!(!hit.is_gap());
        assert_eq!(hit.radius, Some(12.5));

        let gap = PolarSample::gap(45.0);
        assert!(gap.is_gap());
        assert_eq!(gap.angle_deg, 45.0);
    }

    #[test]
    fn test_batch_channel_access() {
        let batch = ScanBatch::new(
            0,
            vec![PolarSample::hit(0.0, 1.0)],
            vec![PolarSample::hit(0.0, 2.0)],
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.channel(Channel::Ir)[0].radius, Some(1.0));
        assert_eq!(batch.channel(Channel::Sonar)[0].radius, Some(2.0));
    }
}
