//! Generation-tagged sweep accumulator.
//!
//! All batches held by the scanner were captured under one fixed pose.
//! Reorientation invalidates the accumulator: the generation counter is
//! incremented and every batch is discarded, so stale-orientation data can
//! never bleed into the next sweep's clustering. Batches tagged with an
//! older generation are rejected rather than silently blended.

use log::debug;

use crate::core::scan::{MergedScan, ScanBatch};
use crate::error::{MapError, Result};

/// Accumulates the sweep batches captured since the last reorientation.
#[derive(Debug, Default)]
pub struct Scanner {
    generation: u64,
    batches: Vec<ScanBatch>,
}

impl Scanner {
    /// Create a scanner at generation zero with no batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation. New batches must be tagged with this value.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of accumulated batches.
    #[inline]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Append a batch captured under the current orientation.
    ///
    /// # Errors
    /// [`MapError::StaleGeneration`] if the batch was captured before the
    /// last reorientation; [`MapError::MisalignedChannels`] if its channels
    /// differ in sample count.
    pub fn add_batch(&mut self, batch: ScanBatch) -> Result<()> {
        if batch.generation != self.generation {
            return Err(MapError::StaleGeneration {
                batch: batch.generation,
                current: self.generation,
            });
        }
        if batch.ir.len() != batch.sonar.len() {
            return Err(MapError::MisalignedChannels {
                ir: batch.ir.len(),
                sonar: batch.sonar.len(),
            });
        }
        self.batches.push(batch);
        Ok(())
    }

    /// Merge all accumulated batches into one angle-sorted view per channel.
    ///
    /// Uses a stable sort: samples at equal angles keep insertion order.
    pub fn merge(&self) -> MergedScan {
        let mut merged = MergedScan::default();
        for batch in &self.batches {
            merged.ir.extend_from_slice(&batch.ir);
            merged.sonar.extend_from_slice(&batch.sonar);
        }
        merged.ir.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));
        merged
            .sonar
            .sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));
        merged
    }

    /// Discard all batches and advance the generation.
    ///
    /// Called on every reorientation, before the pose changes.
    pub fn invalidate(&mut self) {
        debug!(
            "scanner invalidated: dropping {} batch(es), generation {} -> {}",
            self.batches.len(),
            self.generation,
            self.generation + 1
        );
        self.batches.clear();
        self.generation += 1;
    }
}
