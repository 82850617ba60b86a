use stampscan_common::{Result, error::Error};
use stampscan_index_core::SegmentOrd;

use crate::result::Termination;

/// Lifecycle of a single collection.
///
/// ```text
/// Idle -> ScanningSegment(ord) <-> SegmentSaturated(ord) -> Aborted(reason) | Done
/// ```
///
/// Moving to another segment only resets the per-segment saturation; counters
/// and the retained documents carry over. `Aborted` and `Done` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    ScanningSegment(SegmentOrd),
    /// The collector is full and rejected a document of this segment; the
    /// rest of the segment cannot contribute retained documents.
    SegmentSaturated(SegmentOrd),
    Aborted(Termination),
    Done,
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Aborted(_) | ScanState::Done)
    }

    /// The segment being scanned, if any.
    pub fn segment(&self) -> Option<SegmentOrd> {
        match self {
            ScanState::ScanningSegment(ord) | ScanState::SegmentSaturated(ord) => Some(*ord),
            _ => None,
        }
    }

    pub fn is_saturated(&self) -> bool {
        matches!(self, ScanState::SegmentSaturated(_))
    }

    pub fn termination(&self) -> Option<Termination> {
        match self {
            ScanState::Aborted(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn enter_segment(&mut self, ord: SegmentOrd) -> Result<()> {
        self.ensure_active("enter_segment")?;
        *self = ScanState::ScanningSegment(ord);
        Ok(())
    }

    /// Marks the current segment as saturated. A no-op outside of a segment.
    pub fn saturate(&mut self) {
        if let ScanState::ScanningSegment(ord) = *self {
            *self = ScanState::SegmentSaturated(ord);
        }
    }

    pub fn abort(&mut self, reason: Termination) -> Result<()> {
        self.ensure_active("abort")?;
        *self = ScanState::Aborted(reason);
        Ok(())
    }

    /// Completes the scan. An aborted scan stays aborted.
    pub fn finish(&mut self) {
        if !matches!(self, ScanState::Aborted(_)) {
            *self = ScanState::Done;
        }
    }

    fn ensure_active(&self, operation: &str) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::invalid_operation(format!(
                "{operation} after the scan ended ({self:?})"
            )));
        }
        Ok(())
    }
}
