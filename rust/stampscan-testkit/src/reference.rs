//! Brute-force expected outcome of a collection.
//!
//! Visits every record of every segment, with no pruning and no early exit,
//! and reads stamps straight from the records so that read observers attached
//! to the index are not notified.

use stampscan_index_core::{DocAddress, DocMatcher, SegmentOrd};
use stampscan_memory_index::MemoryIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOutcome {
    /// The `k` smallest in-range documents by `(stamp, address)`.
    pub documents: Vec<(DocAddress, i64)>,
    /// Number of in-range matching documents.
    pub in_range: u64,
}

impl ReferenceOutcome {
    pub fn stamps(&self) -> Vec<i64> {
        self.documents.iter().map(|(_, stamp)| *stamp).collect()
    }

    pub fn more_available(&self, k: usize) -> bool {
        self.in_range > k as u64
    }
}

pub fn reference_collect(
    index: &MemoryIndex,
    matcher: &dyn DocMatcher,
    start: i64,
    stop: i64,
    k: usize,
) -> anyhow::Result<ReferenceOutcome> {
    let mut hits = Vec::new();
    for (ord, segment) in index.memory_segments().iter().enumerate() {
        for (doc, record) in segment.records().iter().enumerate() {
            let doc = doc as u32;
            if matcher.matches(segment, doc)? && (start..=stop).contains(&record.stamp) {
                hits.push((DocAddress::new(ord as SegmentOrd, doc), record.stamp));
            }
        }
    }
    let in_range = hits.len() as u64;
    hits.sort_by_key(|&(address, stamp)| (stamp, address));
    hits.truncate(k);
    Ok(ReferenceOutcome {
        documents: hits,
        in_range,
    })
}
