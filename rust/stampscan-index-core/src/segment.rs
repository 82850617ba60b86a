//! Segment-level reader interfaces.

use stampscan_common::Result;

use crate::{DocId, SegmentOrd};

/// Smallest and largest stamp stored in a segment (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampExtrema {
    pub min: i64,
    pub max: i64,
}

impl StampExtrema {
    pub fn new(min: i64, max: i64) -> StampExtrema {
        StampExtrema { min, max }
    }
}

/// Typed random-access lookup of the stamp value of each document.
pub trait StampColumn {
    /// Returns the stamp of `doc`, or `None` when the document has no value.
    fn get(&self, doc: DocId) -> Option<i64>;
}

/// Read access to a single index segment.
///
/// A segment is an independently enumerable partition of the index. Its
/// documents are expected to be sorted by stamp, and all stamps of a segment
/// are expected to be greater than or equal to the stamps of every preceding
/// segment.
pub trait SegmentReader {
    /// Position of this segment in the index enumeration order.
    fn ordinal(&self) -> SegmentOrd;

    /// Global ordinal of the first document of this segment.
    fn doc_base(&self) -> u64;

    /// Number of documents in this segment.
    fn doc_count(&self) -> u32;

    /// Returns the stamp extrema of the segment.
    ///
    /// `None` means the extrema are not known. Consumers must then assume the
    /// segment may contain any stamp.
    fn stamp_extrema(&self) -> Option<StampExtrema>;

    /// Returns the stamp column of this segment.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::MissingStamp` when the segment does not carry the
    /// stamp field.
    fn stamps(&self) -> Result<&dyn StampColumn>;

    /// Returns the values of keyword field `field` for `doc`.
    ///
    /// Used by [`DocMatcher`](crate::DocMatcher) implementations. An empty
    /// slice is returned when the document has no value for the field.
    fn keyword_values(&self, field: &str, doc: DocId) -> &[String];
}

impl StampColumn for Vec<i64> {
    fn get(&self, doc: DocId) -> Option<i64> {
        self.as_slice().get(doc as usize).copied()
    }
}
