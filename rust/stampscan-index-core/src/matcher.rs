use stampscan_common::Result;

use crate::{DocId, SegmentReader};

/// Decides which documents of a segment match the query being collected.
///
/// The collector only ever sees matching documents; everything about how a
/// query is composed stays on this side of the seam.
pub trait DocMatcher {
    fn matches(&self, segment: &dyn SegmentReader, doc: DocId) -> Result<bool>;
}

/// Matches every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl DocMatcher for MatchAll {
    #[inline]
    fn matches(&self, _segment: &dyn SegmentReader, _doc: DocId) -> Result<bool> {
        Ok(true)
    }
}

impl<F> DocMatcher for F
where
    F: Fn(&dyn SegmentReader, DocId) -> bool,
{
    fn matches(&self, segment: &dyn SegmentReader, doc: DocId) -> Result<bool> {
        Ok(self(segment, doc))
    }
}
