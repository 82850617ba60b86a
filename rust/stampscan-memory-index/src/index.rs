use ahash::AHashMap;
use itertools::Itertools;
use stampscan_common::{Result, error::Error};
use stampscan_index_core::{
    DocAddress, FieldSet, STAMP_FIELD, SegmentOrd, SegmentReader, StampIndex, StoredDocument,
    StoredFieldReader, StoredValue, stored,
};

use crate::{record::Record, segment::MemorySegment};

/// An immutable, segmented, in-memory stamp index.
#[derive(Debug)]
pub struct MemoryIndex {
    segments: Vec<MemorySegment>,
    /// Identifier to the address of its most recent record.
    by_identifier: AHashMap<String, DocAddress>,
}

impl MemoryIndex {
    pub(crate) fn new(segments: Vec<MemorySegment>) -> MemoryIndex {
        let mut by_identifier = AHashMap::new();
        for segment in &segments {
            for (doc, record) in segment.records().iter().enumerate() {
                by_identifier.insert(
                    record.identifier.clone(),
                    DocAddress::new(segment.ordinal(), doc as u32),
                );
            }
        }
        MemoryIndex {
            segments,
            by_identifier,
        }
    }

    pub fn memory_segments(&self) -> &[MemorySegment] {
        &self.segments
    }

    /// Total number of documents across all segments.
    pub fn doc_count(&self) -> u64 {
        self.segments.iter().map(|s| s.doc_count() as u64).sum()
    }

    /// Number of records stored for the metadata prefix, or of all records
    /// when `prefix` is `None`.
    pub fn record_count(&self, prefix: Option<&str>) -> usize {
        self.records()
            .filter(|record| has_prefix(record, prefix))
            .count()
    }

    /// The newest stamp among records with the given prefix.
    pub fn last_stamp(&self, prefix: Option<&str>) -> Option<i64> {
        self.records()
            .filter(|record| has_prefix(record, prefix))
            .map(|record| record.stamp)
            .max()
    }

    /// Every metadata prefix used by some record, sorted.
    pub fn prefixes(&self) -> Vec<&str> {
        self.records()
            .flat_map(|record| record.prefixes.iter().map(String::as_str))
            .sorted()
            .dedup()
            .collect()
    }

    /// Every set spec some record belongs to, including the parent levels of
    /// hierarchical specs, sorted.
    pub fn sets(&self) -> Vec<&str> {
        self.records()
            .flat_map(|record| record.sets.iter().map(String::as_str))
            .sorted()
            .dedup()
            .collect()
    }

    /// Address of the record stored under `identifier`.
    ///
    /// When an identifier was added more than once, the record with the
    /// highest stamp wins.
    pub fn address_of(&self, identifier: &str) -> Option<DocAddress> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn find(&self, identifier: &str) -> Option<&Record> {
        let address = self.address_of(identifier)?;
        self.record(address).ok().map(|(_, record)| record)
    }

    pub fn stamp_of(&self, identifier: &str) -> Option<i64> {
        self.find(identifier).map(|record| record.stamp)
    }

    /// Returns `false` for unknown identifiers.
    pub fn is_deleted(&self, identifier: &str) -> bool {
        self.find(identifier).is_some_and(|record| record.tombstone)
    }

    pub fn sets_of(&self, identifier: &str) -> &[String] {
        self.find(identifier)
            .map(|record| record.sets.as_slice())
            .unwrap_or_default()
    }

    pub fn prefixes_of(&self, identifier: &str) -> &[String] {
        self.find(identifier)
            .map(|record| record.prefixes.as_slice())
            .unwrap_or_default()
    }

    fn records(&self) -> impl Iterator<Item = &Record> {
        self.segments.iter().flat_map(|s| s.records().iter())
    }

    fn record(&self, address: DocAddress) -> Result<(&MemorySegment, &Record)> {
        let segment = self
            .segments
            .get(address.segment_ord as usize)
            .ok_or_else(|| Error::not_found(address.segment_ord, address.doc))?;
        let record = segment
            .record(address.doc)
            .ok_or_else(|| Error::not_found(address.segment_ord, address.doc))?;
        Ok((segment, record))
    }
}

fn has_prefix(record: &Record, prefix: Option<&str>) -> bool {
    prefix.is_none_or(|prefix| record.prefixes.iter().any(|p| p == prefix))
}

impl StampIndex for MemoryIndex {
    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment(&self, ord: SegmentOrd) -> Option<&dyn SegmentReader> {
        self.segments
            .get(ord as usize)
            .map(|segment| segment as &dyn SegmentReader)
    }

    fn resolve(&self, address: DocAddress) -> Result<String> {
        let (_, record) = self.record(address)?;
        Ok(record.identifier.clone())
    }

    fn stored_fields(&self) -> &dyn StoredFieldReader {
        self
    }
}

impl StoredFieldReader for MemoryIndex {
    fn document(&self, address: DocAddress, fields: &FieldSet) -> Result<StoredDocument> {
        let (segment, record) = self.record(address)?;
        let mut doc = StoredDocument::new(address);
        for name in fields.iter() {
            let value = match name {
                stored::IDENTIFIER_FIELD => StoredValue::Str(record.identifier.clone()),
                STAMP_FIELD if segment.has_stamps() => StoredValue::I64(record.stamp),
                stored::SETS_FIELD => StoredValue::StrList(record.sets.clone()),
                stored::PREFIX_FIELD => StoredValue::StrList(record.prefixes.clone()),
                stored::TOMBSTONE_FIELD => StoredValue::Bool(record.tombstone),
                _ => continue,
            };
            doc.insert(name, value);
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MemoryIndexBuilder;

    fn sample_index() -> MemoryIndex {
        let mut builder = MemoryIndexBuilder::new();
        builder
            .add_segment(vec![
                Record::new("id:1", 10).with_prefixes(["oai_dc"]).with_sets(["a"]),
                Record::new("id:2", 20).with_prefixes(["oai_dc", "rdf"]),
            ])
            .unwrap();
        builder
            .add_segment(vec![Record::new("id:3", 30)
                .with_prefixes(["rdf"])
                .with_tombstone(true)])
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_resolve_and_global_ordinal() {
        let index = sample_index();
        assert_eq!(index.resolve(DocAddress::new(1, 0)).unwrap(), "id:3");
        assert_eq!(index.global_ordinal(DocAddress::new(1, 0)), Some(2));
        assert_eq!(index.global_ordinal(DocAddress::new(1, 1)), None);
        assert!(index.resolve(DocAddress::new(2, 0)).is_err());
        assert!(index.resolve(DocAddress::new(0, 5)).is_err());
    }

    #[test]
    fn test_stored_fields() {
        let index = sample_index();
        let doc = index
            .stored_fields()
            .document(DocAddress::new(0, 0), &FieldSet::record_header())
            .unwrap();
        assert_eq!(doc.address, Some(DocAddress::new(0, 0)));
        assert_eq!(doc.get("identifier").and_then(|v| v.as_str()), Some("id:1"));
        assert_eq!(doc.get("stamp").and_then(|v| v.as_i64()), Some(10));
        assert_eq!(
            doc.get("sets").and_then(|v| v.as_str_list()),
            Some(&["a".to_string()][..])
        );
        assert_eq!(doc.get("tombstone").and_then(|v| v.as_bool()), Some(false));
        assert!(doc.get("prefix").is_none());

        let doc = index
            .document(DocAddress::new(1, 0), &FieldSet::new(["tombstone", "unknown"]))
            .unwrap();
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.get("tombstone").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_identifier_lookups() {
        let index = sample_index();
        assert_eq!(index.address_of("id:2"), Some(DocAddress::new(0, 1)));
        assert_eq!(index.stamp_of("id:3"), Some(30));
        assert!(index.is_deleted("id:3"));
        assert!(!index.is_deleted("id:1"));
        assert!(!index.is_deleted("id:9"));
        assert_eq!(index.sets_of("id:1"), ["a"]);
        assert!(index.sets_of("id:9").is_empty());
        assert_eq!(index.prefixes_of("id:2"), ["oai_dc", "rdf"]);
        assert_eq!(index.find("id:9"), None);
    }

    #[test]
    fn test_repeated_identifier_resolves_to_newest() {
        let mut builder = MemoryIndexBuilder::new();
        builder
            .add_segment(vec![Record::new("id:1", 10), Record::new("id:2", 20)])
            .unwrap();
        builder
            .add_segment(vec![Record::new("id:1", 30).with_tombstone(true)])
            .unwrap();
        let index = builder.build();
        assert_eq!(index.address_of("id:1"), Some(DocAddress::new(1, 0)));
        assert_eq!(index.stamp_of("id:1"), Some(30));
        assert!(index.is_deleted("id:1"));
    }

    #[test]
    fn test_all_prefixes_and_sets() {
        let index = sample_index();
        assert_eq!(index.prefixes(), vec!["oai_dc", "rdf"]);
        assert_eq!(index.sets(), vec!["a"]);
    }

    #[test]
    fn test_record_count_and_last_stamp() {
        let index = sample_index();
        assert_eq!(index.doc_count(), 3);
        assert_eq!(index.record_count(None), 3);
        assert_eq!(index.record_count(Some("oai_dc")), 2);
        assert_eq!(index.record_count(Some("rdf")), 2);
        assert_eq!(index.record_count(Some("mods")), 0);
        assert_eq!(index.last_stamp(Some("oai_dc")), Some(20));
        assert_eq!(index.last_stamp(None), Some(30));
        assert_eq!(index.last_stamp(Some("mods")), None);
    }
}
