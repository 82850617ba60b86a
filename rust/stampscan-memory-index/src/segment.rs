use std::sync::Arc;

use stampscan_common::{Result, error::Error};
use stampscan_index_core::{
    DocId, ReadObserver, SegmentOrd, SegmentReader, StampColumn, StampExtrema, stored,
};

use crate::record::Record;

/// Stamp column of a [`MemorySegment`], reporting every read to an optional
/// [`ReadObserver`].
pub struct MemoryStampColumn {
    segment: SegmentOrd,
    values: Vec<i64>,
    observer: Option<Arc<dyn ReadObserver>>,
}

impl StampColumn for MemoryStampColumn {
    fn get(&self, doc: DocId) -> Option<i64> {
        if let Some(observer) = &self.observer {
            observer.on_stamp_read(self.segment, doc);
        }
        self.values.as_slice().get(doc as usize).copied()
    }
}

/// A sealed segment of the in-memory index.
pub struct MemorySegment {
    ordinal: SegmentOrd,
    doc_base: u64,
    records: Vec<Record>,
    stamps: Option<MemoryStampColumn>,
    extrema: Option<StampExtrema>,
}

impl MemorySegment {
    pub(crate) fn new(
        ordinal: SegmentOrd,
        doc_base: u64,
        records: Vec<Record>,
        with_stamps: bool,
        extrema: Option<StampExtrema>,
        observer: Option<Arc<dyn ReadObserver>>,
    ) -> MemorySegment {
        let stamps = with_stamps.then(|| MemoryStampColumn {
            segment: ordinal,
            values: records.iter().map(|r| r.stamp).collect(),
            observer,
        });
        MemorySegment {
            ordinal,
            doc_base,
            records,
            stamps,
            extrema,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, doc: DocId) -> Option<&Record> {
        self.records.get(doc as usize)
    }

    pub(crate) fn has_stamps(&self) -> bool {
        self.stamps.is_some()
    }
}

impl SegmentReader for MemorySegment {
    fn ordinal(&self) -> SegmentOrd {
        self.ordinal
    }

    fn doc_base(&self) -> u64 {
        self.doc_base
    }

    fn doc_count(&self) -> u32 {
        self.records.len() as u32
    }

    fn stamp_extrema(&self) -> Option<StampExtrema> {
        self.extrema
    }

    fn stamps(&self) -> Result<&dyn StampColumn> {
        self.stamps
            .as_ref()
            .map(|column| column as &dyn StampColumn)
            .ok_or_else(|| Error::missing_stamp(self.ordinal, None))
    }

    fn keyword_values(&self, field: &str, doc: DocId) -> &[String] {
        let Some(record) = self.record(doc) else {
            return &[];
        };
        match field {
            stored::SETS_FIELD => &record.sets,
            stored::PREFIX_FIELD => &record.prefixes,
            _ => &[],
        }
    }
}

impl std::fmt::Debug for MemorySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySegment")
            .field("ordinal", &self.ordinal)
            .field("doc_base", &self.doc_base)
            .field("doc_count", &self.records.len())
            .field("has_stamps", &self.stamps.is_some())
            .field("extrema", &self.extrema)
            .finish()
    }
}
