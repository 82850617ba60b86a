use std::ops::ControlFlow;

use log::{debug, trace};
use stampscan_common::Result;
use stampscan_index_core::{DocAddress, SegmentOrd};

use crate::{
    bounded::{BoundedOrderedCollector, Offer},
    counter::{RangeClass, RangeCounter},
    options::CollectorOptions,
    result::{CollectionResult, HitCount, Remaining, ScanStats, Termination},
    state::ScanState,
};

/// Per-query collection state: the range counter and the bounded collector
/// composed behind a single per-document entry point.
///
/// A `StampCollector` is created for one query and consumed by
/// [`finish`](Self::finish). Documents must be fed in index order.
#[derive(Debug)]
pub struct StampCollector {
    counter: RangeCounter,
    collector: BoundedOrderedCollector,
    state: ScanState,
    stats: ScanStats,
}

impl StampCollector {
    pub fn new(options: &CollectorOptions) -> StampCollector {
        StampCollector {
            counter: RangeCounter::new(
                options.window,
                options.max_docs_to_collect,
                options.count_exhaustively,
            ),
            collector: BoundedOrderedCollector::new(options.max_docs_to_collect),
            state: ScanState::Idle,
            stats: ScanStats::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn hit_count(&self) -> u64 {
        self.counter.hit_count()
    }

    /// Starts collecting from segment `ord`.
    pub fn set_segment(&mut self, ord: SegmentOrd) -> Result<()> {
        self.state.enter_segment(ord)?;
        self.collector.start_segment();
        self.stats.segments_scanned += 1;
        Ok(())
    }

    /// Records that segment `ord` was pruned without being visited.
    pub fn skip_segment(&mut self, ord: SegmentOrd) {
        trace!("segment {ord} skipped");
        self.stats.segments_skipped += 1;
    }

    /// Ends the scan for a reason found outside of the per-document path.
    pub fn terminate(&mut self, reason: Termination) -> Result<()> {
        debug!(
            "scan terminated ({reason:?}) after {} in-range documents",
            self.counter.hit_count()
        );
        self.state.abort(reason)
    }

    /// Feeds one matching document.
    ///
    /// Returns `Break` when the scan must end, either because the stamp lies
    /// above the window or because capacity was exceeded and an exact count
    /// was not requested.
    pub fn collect(&mut self, address: DocAddress, stamp: i64) -> ControlFlow<Termination> {
        if let Some(reason) = self.state.termination() {
            return ControlFlow::Break(reason);
        }
        self.stats.docs_visited += 1;
        match self.counter.observe(stamp) {
            RangeClass::Below => ControlFlow::Continue(()),
            RangeClass::Above => self.halt(Termination::StampAboveWindow, address),
            RangeClass::InRange => {
                if !self.state.is_saturated()
                    && self.collector.offer(address, stamp) == Offer::Rejected
                    && self.collector.is_saturated_for_current_segment()
                {
                    trace!(
                        "segment {} saturated at stamp {stamp}",
                        address.segment_ord
                    );
                    self.state.saturate();
                }
                if self.counter.capacity_exceeded() {
                    self.halt(Termination::CapacityExceeded, address)
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
    }

    /// Finalizes the collection.
    pub fn finish(mut self) -> CollectionResult {
        let termination = self.state.termination();
        self.state.finish();

        let hit_count = self.counter.hit_count();
        let total = if termination.is_some_and(|reason| reason.truncates_count()) {
            HitCount::LowerBound(hit_count)
        } else {
            HitCount::Exact(hit_count)
        };
        let remaining = if total.is_exact() {
            Remaining::from(self.counter.remaining_records())
        } else {
            Remaining::Unknown
        };

        CollectionResult {
            documents: self.collector.finalize(),
            total,
            more_available: self.counter.more_records_available(),
            remaining,
            termination,
            stats: self.stats,
        }
    }

    fn halt(&mut self, reason: Termination, address: DocAddress) -> ControlFlow<Termination> {
        debug!(
            "scan terminated ({reason:?}) at document {address} after {} in-range documents",
            self.counter.hit_count()
        );
        self.state = ScanState::Aborted(reason);
        ControlFlow::Break(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::CollectionWindow;

    fn options(capacity: usize, count_exhaustively: bool) -> CollectorOptions {
        CollectorOptions::new(capacity, CollectionWindow::new(15, 45).unwrap())
            .with_count_exhaustively(count_exhaustively)
    }

    fn feed(collector: &mut StampCollector, segment: u32, stamps: &[i64]) -> ControlFlow<Termination> {
        collector.set_segment(segment).unwrap();
        for (doc, &stamp) in stamps.iter().enumerate() {
            collector.collect(DocAddress::new(segment, doc as u32), stamp)?;
        }
        ControlFlow::Continue(())
    }

    #[test]
    fn test_above_stamp_breaks() {
        let mut collector = StampCollector::new(&options(10, true));
        let flow = feed(&mut collector, 0, &[10, 20, 30, 40, 50, 60]);
        assert_eq!(flow, ControlFlow::Break(Termination::StampAboveWindow));
        let result = collector.finish();
        assert_eq!(result.stamps(), vec![20, 30, 40]);
        assert_eq!(result.total, HitCount::Exact(3));
        assert_eq!(result.remaining, Remaining::Known(0));
        assert!(!result.more_available);
        assert_eq!(result.stats.docs_visited, 5);
    }

    #[test]
    fn test_capacity_exceeded_breaks() {
        let mut collector = StampCollector::new(&options(2, false));
        let flow = feed(&mut collector, 0, &[20, 25, 30, 35]);
        assert_eq!(flow, ControlFlow::Break(Termination::CapacityExceeded));
        let result = collector.finish();
        assert_eq!(result.stamps(), vec![20, 25]);
        assert_eq!(result.total, HitCount::LowerBound(3));
        assert!(result.more_available);
        assert_eq!(result.remaining, Remaining::Unknown);
        assert_eq!(result.continuation(), Some(25));
    }

    #[test]
    fn test_saturation_resets_on_segment_change() {
        let mut collector = StampCollector::new(&options(1, true));
        assert!(feed(&mut collector, 0, &[20, 21]).is_continue());
        assert_eq!(collector.state(), ScanState::SegmentSaturated(0));
        collector.set_segment(1).unwrap();
        assert_eq!(collector.state(), ScanState::ScanningSegment(1));
        let result = collector.finish();
        assert_eq!(result.stamps(), vec![20]);
        assert_eq!(result.total, HitCount::Exact(2));
        assert_eq!(result.remaining, Remaining::Known(1));
        assert_eq!(result.termination, None);
    }

    #[test]
    fn test_collect_after_termination() {
        let mut collector = StampCollector::new(&options(5, true));
        collector.set_segment(0).unwrap();
        collector.terminate(Termination::Cancelled).unwrap();
        assert_eq!(
            collector.collect(DocAddress::new(0, 0), 20),
            ControlFlow::Break(Termination::Cancelled)
        );
        assert!(collector.set_segment(1).is_err());
        let result = collector.finish();
        assert!(result.documents.is_empty());
        assert_eq!(result.total, HitCount::LowerBound(0));
        assert_eq!(result.remaining, Remaining::Unknown);
    }

    #[test]
    fn test_zero_capacity_counts_only() {
        let mut collector = StampCollector::new(&options(0, true));
        assert!(feed(&mut collector, 0, &[16, 17, 18]).is_continue());
        let result = collector.finish();
        assert!(result.documents.is_empty());
        assert_eq!(result.total, HitCount::Exact(3));
        assert!(result.more_available);
        assert_eq!(result.remaining, Remaining::Known(3));
    }
}
