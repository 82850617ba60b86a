use std::sync::atomic::{AtomicU64, Ordering};

use stampscan_index_core::{DocId, ReadObserver, SegmentOrd};

/// A [`ReadObserver`] that counts stamp reads per segment.
///
/// The number of tracked segments is fixed at construction; reads reported
/// for segments beyond it are counted in [`ReadCounter::untracked`].
#[derive(Debug)]
pub struct ReadCounter {
    per_segment: Vec<AtomicU64>,
    untracked: AtomicU64,
}

impl ReadCounter {
    pub fn new(segment_count: usize) -> ReadCounter {
        ReadCounter {
            per_segment: (0..segment_count).map(|_| AtomicU64::new(0)).collect(),
            untracked: AtomicU64::new(0),
        }
    }

    /// Number of stamp reads performed in segment `segment`.
    pub fn reads(&self, segment: SegmentOrd) -> u64 {
        self.per_segment
            .get(segment as usize)
            .map(|count| count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.per_segment
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum::<u64>()
            + self.untracked()
    }

    pub fn untracked(&self) -> u64 {
        self.untracked.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        for count in &self.per_segment {
            count.store(0, Ordering::Relaxed);
        }
        self.untracked.store(0, Ordering::Relaxed);
    }
}

impl ReadObserver for ReadCounter {
    fn on_stamp_read(&self, segment: SegmentOrd, _doc: DocId) {
        match self.per_segment.get(segment as usize) {
            Some(count) => count.fetch_add(1, Ordering::Relaxed),
            None => self.untracked.fetch_add(1, Ordering::Relaxed),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_counter() {
        let counter = ReadCounter::new(2);
        counter.on_stamp_read(0, 0);
        counter.on_stamp_read(0, 1);
        counter.on_stamp_read(1, 0);
        counter.on_stamp_read(5, 0);
        assert_eq!(counter.reads(0), 2);
        assert_eq!(counter.reads(1), 1);
        assert_eq!(counter.reads(5), 0);
        assert_eq!(counter.untracked(), 1);
        assert_eq!(counter.total(), 4);
        counter.reset();
        assert_eq!(counter.total(), 0);
    }
}
