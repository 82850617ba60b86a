//! Segment-level pruning.
//!
//! Stamps are non-decreasing across the segment enumeration order. A segment
//! lying entirely below the window can therefore be skipped while the scan
//! goes on, but a segment lying entirely above it proves that no later segment
//! can hold an in-range document either, and the whole scan ends.

use stampscan_index_core::StampExtrema;

use crate::window::CollectionWindow;

/// Returns `true` if a segment with stamps in `[segment_min, segment_max]`
/// cannot contain any stamp of `[start, stop]`.
#[inline]
pub fn should_skip_segment(segment_min: i64, segment_max: i64, start: i64, stop: i64) -> bool {
    segment_max < start || stop < segment_min
}

/// What the driver does with a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Visit the documents of the segment.
    Scan,
    /// Every stamp of the segment is below the window: move on to the next one.
    Skip,
    /// Every stamp of the segment is above the window: stop the whole scan.
    Terminate,
}

#[derive(Debug, Clone, Copy)]
pub struct SegmentGate {
    window: CollectionWindow,
}

impl SegmentGate {
    pub fn new(window: CollectionWindow) -> SegmentGate {
        SegmentGate { window }
    }

    /// Decides how to treat a segment given its stamp extrema.
    ///
    /// Unknown extrema never lead to a skip: such a segment is scanned, and
    /// its documents are filtered one by one. The same holds for empty
    /// segments, for which scanning costs nothing.
    pub fn decide(&self, extrema: Option<StampExtrema>, doc_count: u32) -> GateDecision {
        let Some(extrema) = extrema else {
            return GateDecision::Scan;
        };
        if doc_count == 0
            || !should_skip_segment(extrema.min, extrema.max, self.window.start(), self.window.stop())
        {
            GateDecision::Scan
        } else if extrema.min > self.window.stop() {
            GateDecision::Terminate
        } else {
            GateDecision::Skip
        }
    }
}
