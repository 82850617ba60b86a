use stampscan_index_core::StampExtrema;

/// Collects stamp statistics (extrema and value count) for a segment.
#[derive(Debug, Default, Clone)]
pub struct StampStatsCollector {
    min: Option<i64>,
    max: Option<i64>,
    count: usize,
}

impl StampStatsCollector {
    /// Creates a new `StampStatsCollector`.
    pub fn new() -> StampStatsCollector {
        StampStatsCollector::default()
    }

    /// Updates the statistics with a batch of stamps.
    ///
    /// # Arguments
    ///
    /// * `values` - The stamps to be processed.
    pub fn process_values(&mut self, values: &[i64]) {
        self.count += values.len();
        self.min = min_of(self.min, values.iter().copied().min());
        self.max = max_of(self.max, values.iter().copied().max());
    }

    /// Returns the total count of values processed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finalizes the collection and returns the extrema.
    ///
    /// # Returns
    ///
    /// `None` if no value was processed.
    pub fn finish(self) -> Option<StampExtrema> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(StampExtrema::new(min, max)),
            _ => None,
        }
    }
}

fn min_of(left: Option<i64>, right: Option<i64>) -> Option<i64> {
    match (left, right) {
        (None, None) => None,
        (None, Some(_)) => right,
        (Some(_), None) => left,
        (Some(lhs), Some(rhs)) => Some(lhs.min(rhs)),
    }
}

fn max_of(left: Option<i64>, right: Option<i64>) -> Option<i64> {
    match (left, right) {
        (None, None) => None,
        (None, Some(_)) => right,
        (Some(_), None) => left,
        (Some(lhs), Some(rhs)) => Some(lhs.max(rhs)),
    }
}
