//! Stored-field materialization of a finalized collection.

use serde::{Deserialize, Serialize};
use stampscan_common::{Result, error::Error};
use stampscan_index_core::{
    FieldSet, STAMP_FIELD, StampIndex, StoredDocument, StoredFieldReader,
    stored::{IDENTIFIER_FIELD, SETS_FIELD, TOMBSTONE_FIELD},
};

use crate::{datestamp::stamp_to_datestamp, result::CollectionResult};

/// Reads `fields` for every document of `result`, in result order.
pub fn materialize(
    reader: &dyn StoredFieldReader,
    result: &CollectionResult,
    fields: &FieldSet,
) -> Result<Vec<StoredDocument>> {
    result
        .addresses()
        .map(|address| reader.document(address, fields))
        .collect()
}

/// Materializes the headers of the documents of `result`.
pub fn record_headers(index: &dyn StampIndex, result: &CollectionResult) -> Result<Vec<RecordHeader>> {
    materialize(index.stored_fields(), result, &FieldSet::record_header())?
        .iter()
        .map(RecordHeader::try_from)
        .collect()
}

/// The header of a harvested record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub identifier: String,
    pub stamp: i64,
    #[serde(default)]
    pub sets: Vec<String>,
    #[serde(default)]
    pub tombstone: bool,
}

impl RecordHeader {
    /// The stamp of the record rendered as a datestamp.
    pub fn datestamp(&self, precise: bool) -> Option<String> {
        stamp_to_datestamp(self.stamp, precise)
    }
}

impl TryFrom<&StoredDocument> for RecordHeader {
    type Error = Error;

    /// Identifier and stamp are required. Absent sets and tombstone default to
    /// "no sets" and "not deleted".
    fn try_from(doc: &StoredDocument) -> Result<RecordHeader> {
        let identifier = doc
            .get(IDENTIFIER_FIELD)
            .and_then(|value| value.as_str())
            .ok_or_else(|| missing(doc, IDENTIFIER_FIELD))?;
        let stamp = doc
            .get(STAMP_FIELD)
            .and_then(|value| value.as_i64())
            .ok_or_else(|| missing(doc, STAMP_FIELD))?;
        let sets = doc
            .get(SETS_FIELD)
            .and_then(|value| value.as_str_list())
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let tombstone = doc
            .get(TOMBSTONE_FIELD)
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        Ok(RecordHeader {
            identifier: identifier.to_string(),
            stamp,
            sets,
            tombstone,
        })
    }
}

fn missing(doc: &StoredDocument, field: &str) -> Error {
    match doc.address {
        Some(address) => Error::missing_field(field, address.segment_ord, address.doc),
        None => Error::invalid_format(field, "stored field is missing"),
    }
}

#[cfg(test)]
mod tests {
    use stampscan_common::error::ErrorKind;
    use stampscan_index_core::{DocAddress, StoredValue};

    use super::*;

    fn stored(address: Option<DocAddress>) -> StoredDocument {
        let mut doc = StoredDocument {
            address,
            ..Default::default()
        };
        doc.insert(IDENTIFIER_FIELD, StoredValue::Str("oai:x:1".into()));
        doc.insert(STAMP_FIELD, StoredValue::I64(1_357_095_845_000_017));
        doc
    }

    #[test]
    fn test_header_defaults() {
        let header = RecordHeader::try_from(&stored(None)).unwrap();
        assert_eq!(header.identifier, "oai:x:1");
        assert!(header.sets.is_empty());
        assert!(!header.tombstone);
        assert_eq!(header.datestamp(false).as_deref(), Some("2013-01-02T03:04:05Z"));
        assert_eq!(
            header.datestamp(true).as_deref(),
            Some("2013-01-02T03:04:05.17Z")
        );
    }

    #[test]
    fn test_header_missing_stamp() {
        let mut doc = stored(Some(DocAddress::new(2, 5)));
        doc.fields.remove(STAMP_FIELD);
        let err = RecordHeader::try_from(&doc).unwrap_err();
        match err.kind() {
            ErrorKind::MissingField { field, segment, doc } => {
                assert_eq!(field, "stamp");
                assert_eq!((*segment, *doc), (2, 5));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
