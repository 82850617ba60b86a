//! Index-facing interfaces consumed by the stampscan collector.
//!
//! This crate provides the traits and small value types through which the
//! collection algorithm talks to a segmented document index, without depending
//! on any particular index implementation.
//!
//! # Overview
//!
//! An index is an ordered sequence of segments. Every document carries a
//! *stamp* (a monotonic `i64` logical timestamp) and the index guarantees that
//! stamps are non-decreasing in enumeration order, both within a segment and
//! across segments. The collector relies on that ordering; it never enforces it.
//!
//! The boundary consists of:
//!
//! - [`StampIndex`]: segment enumeration, document reference resolution and
//!   access to stored fields
//! - [`SegmentReader`]: per-segment extrema, document count, the stamp column
//!   and keyword values used for query matching
//! - [`DocMatcher`]: the query seam, deciding which documents of a segment
//!   match before their stamps are read
//! - [`StoredFieldReader`]: stored-field materialization for the documents a
//!   collection selected
//! - [`ReadObserver`]: an instrumentation hook notified on every stamp read

use serde::{Deserialize, Serialize};
use stampscan_common::Result;

pub mod matcher;
pub mod observer;
pub mod segment;
pub mod stored;

pub use matcher::{DocMatcher, MatchAll};
pub use observer::ReadObserver;
pub use segment::{SegmentReader, StampColumn, StampExtrema};
pub use stored::{FieldSet, StoredDocument, StoredFieldReader, StoredValue};

/// Document ordinal within a segment.
pub type DocId = u32;

/// Position of a segment in the index enumeration order.
pub type SegmentOrd = u32;

/// Name of the stored and indexed stamp field.
pub const STAMP_FIELD: &str = "stamp";

/// Reference to a single document: the segment it lives in and its ordinal
/// within that segment.
///
/// Addresses order by segment first and then by ordinal, which is the order in
/// which a scan visits documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocAddress {
    pub segment_ord: SegmentOrd,
    pub doc: DocId,
}

impl DocAddress {
    pub fn new(segment_ord: SegmentOrd, doc: DocId) -> DocAddress {
        DocAddress { segment_ord, doc }
    }
}

impl std::fmt::Display for DocAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.segment_ord, self.doc)
    }
}

/// A segmented document index whose documents carry a stamp.
///
/// # Thread Safety
///
/// An index may be shared by many concurrently running collections, each of
/// which owns its own collector state. Implementations must therefore be
/// `Send + Sync`; readers are only ever used through shared references.
pub trait StampIndex: Send + Sync {
    /// Returns the number of segments in the index.
    fn segment_count(&self) -> usize;

    /// Returns the segment at position `ord` in enumeration order.
    fn segment(&self, ord: SegmentOrd) -> Option<&dyn SegmentReader>;

    /// Maps a document reference to the durable external identifier of the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not denote a document of this
    /// index, or if the document has no identifier.
    fn resolve(&self, address: DocAddress) -> Result<String>;

    /// Returns the stored field reader used to materialize selected documents.
    fn stored_fields(&self) -> &dyn StoredFieldReader;

    /// Converts a document reference into a global ordinal: the segment base
    /// plus the segment-local ordinal.
    fn global_ordinal(&self, address: DocAddress) -> Option<u64> {
        self.segment(address.segment_ord)
            .filter(|segment| address.doc < segment.doc_count())
            .map(|segment| segment.doc_base() + address.doc as u64)
    }
}
