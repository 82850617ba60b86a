use crate::window::CollectionWindow;

/// Position of a stamp relative to the collection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeClass {
    Below,
    InRange,
    Above,
}

/// Per-document range classification plus the running hit counters.
#[derive(Debug, Clone)]
pub struct RangeCounter {
    window: CollectionWindow,
    capacity: usize,
    count_exhaustively: bool,
    hit_count: u64,
    more_records_available: bool,
}

impl RangeCounter {
    pub fn new(window: CollectionWindow, capacity: usize, count_exhaustively: bool) -> RangeCounter {
        RangeCounter {
            window,
            capacity,
            count_exhaustively,
            hit_count: 0,
            more_records_available: false,
        }
    }

    /// Classifies `stamp`, counting it when it lies in the window.
    #[inline]
    pub fn observe(&mut self, stamp: i64) -> RangeClass {
        if stamp < self.window.start() {
            RangeClass::Below
        } else if stamp > self.window.stop() {
            RangeClass::Above
        } else {
            self.hit_count += 1;
            if self.hit_count > self.capacity as u64 {
                self.more_records_available = true;
            }
            RangeClass::InRange
        }
    }

    /// Whether the scan should end now because capacity was exceeded and an
    /// exact count was not requested.
    #[inline]
    pub fn capacity_exceeded(&self) -> bool {
        self.more_records_available && !self.count_exhaustively
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    pub fn more_records_available(&self) -> bool {
        self.more_records_available
    }

    pub fn count_exhaustively(&self) -> bool {
        self.count_exhaustively
    }

    /// Number of in-range documents beyond the K retained ones.
    ///
    /// `None` when counting was not exhaustive, since the scan may have
    /// stopped before the true count was known.
    pub fn remaining_records(&self) -> Option<u64> {
        self.count_exhaustively
            .then(|| self.hit_count.saturating_sub(self.capacity as u64))
    }
}
