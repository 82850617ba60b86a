//! Retention of the K smallest in-range stamps.

use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use stampscan_index_core::DocAddress;

use crate::result::CollectedDoc;

/// Upper bound on the number of heap slots reserved up front.
const MAX_PREALLOCATED: usize = 4096;

/// Outcome of [`BoundedOrderedCollector::offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Offer {
    /// The collector had room and kept the document.
    Inserted,
    /// The document displaced the worst kept document, which is returned.
    Replaced(CollectedDoc),
    /// The document is not better than anything already kept.
    Rejected,
}

/// Keeps the K documents with the smallest stamps among those offered.
///
/// Internally a max-heap keyed by `(stamp, address)`, so the worst kept
/// document sits at the top. Documents may be offered in any order.
///
/// Equal stamps are ordered by [`DocAddress`]: among documents sharing a
/// stamp, the ones earlier in index order are preferred. A driver offering
/// documents in index order therefore never replaces a kept document by a
/// later one with the same stamp.
#[derive(Debug, Clone)]
pub struct BoundedOrderedCollector {
    capacity: usize,
    heap: BinaryHeap<CollectedDoc>,
    segment_saturated: bool,
}

impl BoundedOrderedCollector {
    pub fn new(capacity: usize) -> BoundedOrderedCollector {
        BoundedOrderedCollector {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(MAX_PREALLOCATED)),
            segment_saturated: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The largest stamp currently kept.
    pub fn worst_stamp(&self) -> Option<i64> {
        self.heap.peek().map(|doc| doc.stamp)
    }

    /// Offers a document.
    ///
    /// A rejection while full marks the collector as saturated for the current
    /// segment: if the segment is sorted by stamp, none of its remaining
    /// documents can be kept either.
    pub fn offer(&mut self, address: DocAddress, stamp: i64) -> Offer {
        let candidate = CollectedDoc { address, stamp };
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            return Offer::Inserted;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if candidate < *worst => {
                let evicted = std::mem::replace(&mut *worst, candidate);
                // Dropping the PeekMut restores the heap order.
                drop(worst);
                Offer::Replaced(evicted)
            }
            _ => {
                self.segment_saturated = true;
                Offer::Rejected
            }
        }
    }

    /// Resets the per-segment saturation. Called whenever a new segment starts.
    pub fn start_segment(&mut self) {
        self.segment_saturated = false;
    }

    /// `true` once the collector is full and rejected a document of the
    /// current segment.
    pub fn is_saturated_for_current_segment(&self) -> bool {
        self.segment_saturated
    }

    /// Consumes the collector and returns the kept documents ascending by
    /// stamp, then by address.
    pub fn finalize(self) -> Vec<CollectedDoc> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(doc: u32) -> DocAddress {
        DocAddress::new(0, doc)
    }

    fn stamps(docs: &[CollectedDoc]) -> Vec<i64> {
        docs.iter().map(|d| d.stamp).collect()
    }

    #[test]
    fn test_keeps_smallest_in_arbitrary_order() {
        let mut collector = BoundedOrderedCollector::new(3);
        for (doc, stamp) in [50, 10, 40, 30, 20, 60].into_iter().enumerate() {
            collector.offer(addr(doc as u32), stamp);
        }
        assert!(collector.is_full());
        assert_eq!(collector.worst_stamp(), Some(30));
        assert_eq!(stamps(&collector.finalize()), vec![10, 20, 30]);
    }

    #[test]
    fn test_offer_outcomes() {
        let mut collector = BoundedOrderedCollector::new(2);
        assert_eq!(collector.offer(addr(0), 30), Offer::Inserted);
        assert_eq!(collector.offer(addr(1), 20), Offer::Inserted);
        assert_eq!(collector.offer(addr(2), 40), Offer::Rejected);
        assert!(collector.is_saturated_for_current_segment());
        assert_eq!(
            collector.offer(addr(3), 10),
            Offer::Replaced(CollectedDoc {
                address: addr(0),
                stamp: 30
            })
        );
        assert_eq!(stamps(&collector.finalize()), vec![10, 20]);
    }

    #[test]
    fn test_equal_stamps_prefer_earlier_address() {
        let mut collector = BoundedOrderedCollector::new(2);
        collector.offer(addr(5), 7);
        collector.offer(addr(6), 7);
        assert_eq!(collector.offer(addr(7), 7), Offer::Rejected);
        assert!(matches!(collector.offer(addr(1), 7), Offer::Replaced(d) if d.address == addr(6)));
        let kept = collector.finalize();
        assert_eq!(
            kept.iter().map(|d| d.address).collect::<Vec<_>>(),
            vec![addr(1), addr(5)]
        );
    }

    #[test]
    fn test_saturation_resets_per_segment() {
        let mut collector = BoundedOrderedCollector::new(1);
        collector.offer(addr(0), 1);
        collector.offer(addr(1), 2);
        assert!(collector.is_saturated_for_current_segment());
        collector.start_segment();
        assert!(!collector.is_saturated_for_current_segment());
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut collector = BoundedOrderedCollector::new(0);
        assert!(collector.is_full());
        assert_eq!(collector.offer(addr(0), 1), Offer::Rejected);
        assert!(collector.is_saturated_for_current_segment());
        assert!(collector.finalize().is_empty());
    }
}
