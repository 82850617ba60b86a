//! Construction of a [`MemoryIndex`] from records.

use std::sync::Arc;

use itertools::Itertools;
use log::debug;
use stampscan_common::{Result, error::Error};
use stampscan_index_core::{ReadObserver, SegmentOrd};

use crate::{index::MemoryIndex, record::Record, segment::MemorySegment, stats::StampStatsCollector};

/// How a segment is sealed.
#[derive(Debug, Clone, Copy)]
struct SegmentOptions {
    with_stats: bool,
    with_stamps: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        SegmentOptions {
            with_stats: true,
            with_stamps: true,
        }
    }
}

/// Builds a [`MemoryIndex`] one segment at a time.
///
/// Each added segment is sorted by stamp (stable, so records with equal stamps
/// keep their insertion order) and its stamp extrema are computed. The builder
/// rejects a segment whose smallest stamp is below the largest stamp of a
/// previously added segment, since readers rely on stamps being non-decreasing
/// across the whole index.
#[derive(Default)]
pub struct MemoryIndexBuilder {
    segments: Vec<MemorySegment>,
    next_doc_base: u64,
    last_stamp: Option<i64>,
    observer: Option<Arc<dyn ReadObserver>>,
}

impl MemoryIndexBuilder {
    pub fn new() -> MemoryIndexBuilder {
        MemoryIndexBuilder::default()
    }

    /// Attaches a read observer to every segment added afterwards.
    pub fn with_observer(mut self, observer: Arc<dyn ReadObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Adds a segment with stamp extrema.
    pub fn add_segment(&mut self, records: Vec<Record>) -> Result<&mut Self> {
        self.push_segment(records, SegmentOptions::default())
    }

    /// Adds a segment that does not expose its stamp extrema.
    pub fn add_segment_without_stats(&mut self, records: Vec<Record>) -> Result<&mut Self> {
        self.push_segment(
            records,
            SegmentOptions {
                with_stats: false,
                ..Default::default()
            },
        )
    }

    /// Adds a segment that carries no stamp column at all.
    ///
    /// Reading stamps from such a segment fails; it exists to model readers that
    /// lack the expected field.
    pub fn add_segment_without_stamps(&mut self, records: Vec<Record>) -> Result<&mut Self> {
        self.push_segment(
            records,
            SegmentOptions {
                with_stats: false,
                with_stamps: false,
            },
        )
    }

    /// Splits `records` into segments of at most `segment_size` records.
    ///
    /// The records are sorted by stamp first, so the resulting segments are
    /// ordered across the index regardless of the input order.
    pub fn add_records(&mut self, mut records: Vec<Record>, segment_size: usize) -> Result<&mut Self> {
        if segment_size == 0 {
            return Err(Error::invalid_arg("segment_size", "must be positive"));
        }
        records.sort_by_key(|r| r.stamp);
        for chunk in &records.into_iter().chunks(segment_size) {
            self.add_segment(chunk.collect())?;
        }
        Ok(self)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn build(self) -> MemoryIndex {
        MemoryIndex::new(self.segments)
    }

    fn push_segment(&mut self, mut records: Vec<Record>, options: SegmentOptions) -> Result<&mut Self> {
        records.sort_by_key(|r| r.stamp);
        records.iter_mut().for_each(Record::flatten_sets);

        let stamps = records.iter().map(|r| r.stamp).collect::<Vec<_>>();
        let mut stats = StampStatsCollector::new();
        stats.process_values(&stamps);
        let extrema = stats.finish();

        if let (Some(last), Some(extrema)) = (self.last_stamp, extrema) {
            if extrema.min < last {
                return Err(Error::invalid_format(
                    "segment",
                    format!(
                        "segment {} starts at stamp {} below the preceding stamp {last}",
                        self.segments.len(),
                        extrema.min
                    ),
                ));
            }
        }
        if let Some(extrema) = extrema {
            self.last_stamp = Some(extrema.max);
        }

        let ordinal = self.segments.len() as SegmentOrd;
        let doc_count = records.len() as u64;
        debug!(
            "sealing segment {ordinal}: {doc_count} docs, base {}, extrema {:?}",
            self.next_doc_base, extrema
        );
        self.segments.push(MemorySegment::new(
            ordinal,
            self.next_doc_base,
            records,
            options.with_stamps,
            extrema.filter(|_| options.with_stats),
            self.observer.clone(),
        ));
        self.next_doc_base += doc_count;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use stampscan_common::error::ErrorKind;
    use stampscan_index_core::{StampExtrema, StampIndex};

    use super::*;

    fn records(stamps: &[i64]) -> Vec<Record> {
        stamps
            .iter()
            .map(|&s| Record::new(format!("id:{s}"), s))
            .collect()
    }

    #[test]
    fn test_segments_are_sorted_with_extrema() {
        let mut builder = MemoryIndexBuilder::new();
        builder.add_segment(records(&[30, 10, 20])).unwrap();
        builder.add_segment(records(&[40, 50])).unwrap();
        let index = builder.build();

        assert_eq!(index.segment_count(), 2);
        let first = index.segment(0).unwrap();
        assert_eq!(first.doc_count(), 3);
        assert_eq!(first.doc_base(), 0);
        assert_eq!(first.stamp_extrema(), Some(StampExtrema::new(10, 30)));
        let stamps = first.stamps().unwrap();
        assert_eq!(
            (0..3).map(|d| stamps.get(d).unwrap()).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );

        let second = index.segment(1).unwrap();
        assert_eq!(second.doc_base(), 3);
        assert_eq!(second.stamp_extrema(), Some(StampExtrema::new(40, 50)));
    }

    #[test]
    fn test_rejects_out_of_order_segment() {
        let mut builder = MemoryIndexBuilder::new();
        builder.add_segment(records(&[10, 20])).unwrap();
        let err = builder.add_segment(records(&[15, 30])).err().unwrap();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

        // Equal boundary stamps are allowed.
        builder.add_segment(records(&[20, 30])).unwrap();
    }

    #[test]
    fn test_empty_and_statless_segments() {
        let mut builder = MemoryIndexBuilder::new();
        builder.add_segment(Vec::new()).unwrap();
        builder.add_segment_without_stats(records(&[1, 2])).unwrap();
        builder.add_segment_without_stamps(records(&[3])).unwrap();
        let index = builder.build();

        assert_eq!(index.segment(0).unwrap().stamp_extrema(), None);
        assert_eq!(index.segment(1).unwrap().stamp_extrema(), None);
        assert!(index.segment(1).unwrap().stamps().is_ok());
        let err = index.segment(2).unwrap().stamps().err().unwrap();
        assert!(err.is_missing_stamp());
    }

    #[test]
    fn test_add_records_chunks() {
        let mut builder = MemoryIndexBuilder::new();
        builder
            .add_records(records(&[9, 1, 5, 3, 7, 2, 8]), 3)
            .unwrap();
        assert_eq!(builder.segment_count(), 3);
        let index = builder.build();
        assert_eq!(
            index.segment(0).unwrap().stamp_extrema(),
            Some(StampExtrema::new(1, 3))
        );
        assert_eq!(
            index.segment(2).unwrap().stamp_extrema(),
            Some(StampExtrema::new(9, 9))
        );
        assert!(MemoryIndexBuilder::new().add_records(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_set_hierarchy_is_flattened() {
        let mut builder = MemoryIndexBuilder::new();
        builder
            .add_segment(vec![Record::new("id:1", 1).with_sets(["a:b"])])
            .unwrap();
        let index = builder.build();
        assert_eq!(index.segment(0).unwrap().keyword_values("sets", 0), ["a", "a:b"]);
    }
}
