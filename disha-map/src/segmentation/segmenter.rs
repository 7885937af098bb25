//! Angular clustering of merged scans into candidate objects.
//!
//! A single forward pass over the angle-sorted IR channel groups
//! contiguous real returns into runs. A missed reading closes the open
//! run; the run is emitted as an [`ObjectCluster`] when its angular span
//! exceeds the configured minimum width, and discarded as noise
//! otherwise. A run still open at the end of the sequence is flushed
//! through the same width test.
//!
//! Two adjacent clusters separated by a single missed sample are NOT
//! merged. That is a deliberate simplification of this segmenter, not an
//! oversight.

use log::debug;

use super::config::{SegmenterConfig, SonarMatch};
use crate::core::scan::{MergedScan, PolarSample};

/// A contiguous angular run of real returns wide enough to represent one
/// object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCluster {
    /// Start index into the merged IR channel (inclusive).
    pub start: usize,
    /// End index into the merged IR channel (exclusive).
    pub end: usize,
    /// Angle of the first sample in the run.
    pub start_angle: f64,
    /// Angle of the last sample in the run.
    pub end_angle: f64,
    /// IR samples covered by the run.
    pub ir: Vec<PolarSample>,
    /// Matching sonar samples (selection controlled by [`SonarMatch`]).
    pub sonar: Vec<PolarSample>,
}

impl ObjectCluster {
    /// Angular span of the cluster in degrees.
    #[inline]
    pub fn span_deg(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Clusters a merged scan into disjoint object candidates.
#[derive(Clone, Debug, Default)]
pub struct ObjectSegmenter {
    config: SegmenterConfig,
}

impl ObjectSegmenter {
    /// Create a segmenter with the given configuration.
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment the IR channel of a merged scan.
    ///
    /// Returns clusters ordered by strictly increasing start angle, each
    /// spanning more than `min_width_deg`. Empty or all-gap input yields
    /// an empty vector; that is not an error.
    pub fn segment(&self, merged: &MergedScan) -> Vec<ObjectCluster> {
        let ir = &merged.ir;
        let mut clusters = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, sample) in ir.iter().enumerate() {
            if !sample.is_gap() {
                if run_start.is_none() {
                    run_start = Some(i);
                }
            } else if let Some(start) = run_start.take() {
                // The run ends at the sample immediately before this gap.
                self.close_run(merged, start, i, &mut clusters);
            }
        }

        // Flush a run still open at the end of the sweep. The boundary uses
        // the same width test as a gap-terminated run.
        if let Some(start) = run_start {
            self.close_run(merged, start, ir.len(), &mut clusters);
        }

        debug!(
            "segmented {} IR samples into {} cluster(s)",
            ir.len(),
            clusters.len()
        );
        clusters
    }

    /// Emit the run `[start, end)` if it is wide enough, discard otherwise.
    fn close_run(
        &self,
        merged: &MergedScan,
        start: usize,
        end: usize,
        clusters: &mut Vec<ObjectCluster>,
    ) {
        let ir = &merged.ir;
        let start_angle = ir[start].angle_deg;
        let end_angle = ir[end - 1].angle_deg;

        if end_angle - start_angle <= self.config.min_width_deg {
            debug!(
                "discarding narrow run [{start_angle:.1}, {end_angle:.1}] deg as noise"
            );
            return;
        }

        let sonar = match self.config.sonar_match {
            SonarMatch::ByIndex => {
                // Channels are angle-aligned by capture contract; clamp in
                // case the sonar channel is shorter.
                let s_end = end.min(merged.sonar.len());
                let s_start = start.min(s_end);
                merged.sonar[s_start..s_end].to_vec()
            }
            SonarMatch::ByNearestAngle => {
                nearest_angle_range(&merged.sonar, start_angle, end_angle)
            }
        };

        clusters.push(ObjectCluster {
            start,
            end,
            start_angle,
            end_angle,
            ir: ir[start..end].to_vec(),
            sonar,
        });
    }
}

/// Select the sonar samples whose angles fall nearest the cluster bounds.
///
/// `samples` must be angle-sorted (the merge guarantees this). The range
/// runs from the sample nearest `start_angle` through the sample nearest
/// `end_angle`, inclusive.
fn nearest_angle_range(samples: &[PolarSample], start_angle: f64, end_angle: f64) -> Vec<PolarSample> {
    if samples.is_empty() {
        return Vec::new();
    }
    let lo = nearest_angle_index(samples, start_angle);
    let hi = nearest_angle_index(samples, end_angle);
    samples[lo..=hi.max(lo)].to_vec()
}

fn nearest_angle_index(samples: &[PolarSample], angle: f64) -> usize {
    let insertion = samples.partition_point(|s| s.angle_deg < angle);
    if insertion == 0 {
        return 0;
    }
    if insertion == samples.len() {
        return samples.len() - 1;
    }
    let before = angle - samples[insertion - 1].angle_deg;
    let after = samples[insertion].angle_deg - angle;
    if before <= after {
        insertion - 1
    } else {
        insertion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn merged(ir: Vec<PolarSample>) -> MergedScan {
        let sonar = ir
            .iter()
            .map(|s| PolarSample {
                angle_deg: s.angle_deg,
                radius: s.radius.map(|r| r + 100.0),
            })
            .collect();
        MergedScan { ir, sonar }
    }

    fn hits_and_gaps(spec: &[(f64, Option<f64>)]) -> Vec<PolarSample> {
        spec.iter()
            .map(|&(angle, radius)| PolarSample { angle_deg: angle, radius })
            .collect()
    }

    #[test]
    fn test_single_cluster_between_gaps() {
        // The canonical scenario: one run of three returns between gaps.
        let scan = merged(hits_and_gaps(&[
            (10.0, None),
            (20.0, Some(5.0)),
            (30.0, Some(5.2)),
            (40.0, Some(5.1)),
            (50.0, None),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        assert_eq!(clusters.len(), 1);

        let c = &clusters[0];
        assert_eq!((c.start, c.end), (1, 4));
        assert_relative_eq!(c.start_angle, 20.0);
        assert_relative_eq!(c.end_angle, 40.0);
        assert_relative_eq!(c.span_deg(), 20.0);
        assert_eq!(c.ir.len(), 3);
        assert_eq!(c.sonar.len(), 3);
    }

    #[test]
    fn test_narrow_run_discarded() {
        // Span of exactly min_width is NOT enough; the test is strict.
        let scan = merged(hits_and_gaps(&[
            (10.0, Some(4.0)),
            (13.0, Some(4.1)),
            (14.0, None),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_open_run_flushed_at_end() {
        // No trailing gap: the open run must still be emitted.
        let scan = merged(hits_and_gaps(&[
            (100.0, None),
            (110.0, Some(8.0)),
            (120.0, Some(8.3)),
            (130.0, Some(8.1)),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        assert_eq!(clusters.len(), 1);
        assert_eq!((clusters[0].start, clusters[0].end), (1, 4));
        assert_relative_eq!(clusters[0].end_angle, 130.0);
    }

    #[test]
    fn test_narrow_open_run_discarded_at_end() {
        let scan = merged(hits_and_gaps(&[(10.0, None), (20.0, Some(5.0))]));
        let clusters = ObjectSegmenter::default().segment(&scan);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_single_gap_does_not_merge_clusters() {
        // Two wide runs separated by one missed sample stay separate.
        let scan = merged(hits_and_gaps(&[
            (0.0, Some(6.0)),
            (10.0, Some(6.0)),
            (20.0, Some(6.0)),
            (30.0, None),
            (40.0, Some(7.0)),
            (50.0, Some(7.0)),
            (60.0, Some(7.0)),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        assert_eq!(clusters.len(), 2);
        assert_eq!((clusters[0].start, clusters[0].end), (0, 3));
        assert_eq!((clusters[1].start, clusters[1].end), (4, 7));
    }

    #[test]
    fn test_clusters_disjoint_and_ascending() {
        let scan = merged(hits_and_gaps(&[
            (0.0, Some(1.0)),
            (5.0, Some(1.0)),
            (6.0, None),
            (10.0, Some(2.0)),
            (20.0, Some(2.0)),
            (21.0, None),
            (30.0, Some(3.0)),
            (45.0, Some(3.0)),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        for pair in clusters.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start_angle < pair[1].start_angle);
        }
        for c in &clusters {
            assert!(c.span_deg() > 3.0);
        }
    }

    #[test]
    fn test_empty_and_all_gap_input() {
        let segmenter = ObjectSegmenter::default();
        assert!(segmenter.segment(&MergedScan::default()).is_empty());

        let scan = merged(hits_and_gaps(&[(0.0, None), (10.0, None), (20.0, None)]));
        assert!(segmenter.segment(&scan).is_empty());
    }

    #[test]
    fn test_sonar_matched_by_index() {
        let scan = merged(hits_and_gaps(&[
            (10.0, None),
            (20.0, Some(5.0)),
            (30.0, Some(5.0)),
            (40.0, Some(5.0)),
            (50.0, None),
        ]));

        let clusters = ObjectSegmenter::default().segment(&scan);
        // Sonar radii in `merged()` are IR + 100, same indices.
        assert_eq!(clusters[0].sonar[0].radius, Some(105.0));
        assert_eq!(clusters[0].sonar.len(), 3);
    }

    #[test]
    fn test_sonar_matched_by_nearest_angle() {
        // Sonar channel sampled at offset angles.
        let ir = hits_and_gaps(&[
            (10.0, None),
            (20.0, Some(5.0)),
            (30.0, Some(5.0)),
            (40.0, Some(5.0)),
            (50.0, None),
        ]);
        let sonar = hits_and_gaps(&[
            (12.0, Some(9.0)),
            (21.0, Some(9.1)),
            (31.0, Some(9.2)),
            (41.0, Some(9.3)),
            (55.0, Some(9.4)),
        ]);
        let scan = MergedScan { ir, sonar };

        let config = SegmenterConfig::default().with_sonar_match(SonarMatch::ByNearestAngle);
        let clusters = ObjectSegmenter::new(config).segment(&scan);
        assert_eq!(clusters.len(), 1);

        // Bounds 20..40 match sonar angles 21..41.
        let angles: Vec<f64> = clusters[0].sonar.iter().map(|s| s.angle_deg).collect();
        assert_eq!(angles, vec![21.0, 31.0, 41.0]);
    }

    #[test]
    fn test_nearest_angle_index_bounds() {
        let samples = hits_and_gaps(&[(10.0, Some(1.0)), (20.0, Some(1.0))]);
        assert_eq!(nearest_angle_index(&samples, -5.0), 0);
        assert_eq!(nearest_angle_index(&samples, 14.0), 0);
        assert_eq!(nearest_angle_index(&samples, 16.0), 1);
        assert_eq!(nearest_angle_index(&samples, 99.0), 1);
    }
}
