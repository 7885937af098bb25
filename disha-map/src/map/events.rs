//! Render event stream.
//!
//! The renderer is a pure consumer: it subscribes to an ordered stream of
//! map events and never feeds back into core state. Sinks receive every
//! mutation the environment map performs, in the order it performs them.

use crossbeam_channel::Sender;
use log::trace;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::{Breadcrumb, Contour, DangerEvent};
use crate::core::point::MapPoint;
use crate::core::pose::Pose;

/// One map mutation, in the order it was applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The pose changed (after a move or rotation).
    PoseChanged(Pose),
    /// Projected scan returns were appended to the point cloud.
    ScanPointsAdded(Vec<MapPoint>),
    /// A breadcrumb was recorded at a pre-move location.
    BreadcrumbAdded(Breadcrumb),
    /// A contour was derived from the current merged scan.
    ContourAdded {
        /// The boundary polyline.
        contour: Contour,
        /// True while the contour may still be replaced by a later scan.
        volatile: bool,
    },
    /// All volatile contours became finalized.
    ContoursFinalized,
    /// A hazard was recorded.
    DangerAdded(DangerEvent),
}

/// Consumer of the render event stream.
///
/// Implementations must not block for long: the map publishes events
/// synchronously from its mutation path.
pub trait RenderSink: Send {
    /// Receive one event.
    fn publish(&self, event: &MapEvent);
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn publish(&self, _event: &MapEvent) {}
}

/// Sink that forwards events over a crossbeam channel to a renderer
/// thread. A disconnected receiver is tolerated: the map keeps working
/// with rendering detached.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<MapEvent>,
}

impl ChannelSink {
    /// Wrap a channel sender.
    pub fn new(tx: Sender<MapEvent>) -> Self {
        Self { tx }
    }
}

impl RenderSink for ChannelSink {
    fn publish(&self, event: &MapEvent) {
        if self.tx.send(event.clone()).is_err() {
            trace!("render consumer disconnected; dropping event");
        }
    }
}

/// Sink that records events in memory. Intended for tests asserting on
/// event ordering.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MapEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<MapEvent> {
        let mut guard = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }

    /// Snapshot of everything recorded so far.
    pub fn snapshot(&self) -> Vec<MapEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl RenderSink for RecordingSink {
    fn publish(&self, event: &MapEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
