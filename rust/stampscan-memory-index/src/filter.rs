use stampscan_common::Result;
use stampscan_index_core::{DocId, DocMatcher, SegmentReader, stored};

/// Record selection by metadata prefix and set membership.
///
/// A document matches when it
/// - carries `prefix` (if one is given),
/// - is a member of at least one of `sets` (if any are given), and
/// - is a member of every set in `set_mask`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub prefix: Option<String>,
    pub sets: Vec<String>,
    pub set_mask: Vec<String>,
}

impl RecordFilter {
    pub fn new() -> RecordFilter {
        RecordFilter::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_sets<I, S>(mut self, sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets = sets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_set_mask<I, S>(mut self, set_mask: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_mask = set_mask.into_iter().map(Into::into).collect();
        self
    }
}

impl DocMatcher for RecordFilter {
    fn matches(&self, segment: &dyn SegmentReader, doc: DocId) -> Result<bool> {
        if let Some(prefix) = &self.prefix {
            if !segment
                .keyword_values(stored::PREFIX_FIELD, doc)
                .iter()
                .any(|p| p == prefix)
            {
                return Ok(false);
            }
        }
        let member_sets = segment.keyword_values(stored::SETS_FIELD, doc);
        let is_member = |set: &String| member_sets.contains(set);
        if !self.sets.is_empty() && !self.sets.iter().any(is_member) {
            return Ok(false);
        }
        Ok(self.set_mask.iter().all(is_member))
    }
}
