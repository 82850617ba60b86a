//! Stored-field materialization interfaces.
//!
//! Materialization happens after a collection has been finalized: the caller
//! hands the selected document references to a [`StoredFieldReader`] together
//! with the fixed set of field names it needs.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use stampscan_common::Result;

use crate::DocAddress;

pub const IDENTIFIER_FIELD: &str = "identifier";
pub const SETS_FIELD: &str = "sets";
pub const PREFIX_FIELD: &str = "prefix";
pub const TOMBSTONE_FIELD: &str = "tombstone";

/// A single stored field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    I64(i64),
    Str(String),
    StrList(Vec<String>),
}

impl StoredValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StoredValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoredValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            StoredValue::StrList(v) => Some(v),
            _ => None,
        }
    }
}

/// The stored fields of one document, restricted to the requested field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub address: Option<DocAddress>,
    pub fields: BTreeMap<String, StoredValue>,
}

impl StoredDocument {
    pub fn new(address: DocAddress) -> StoredDocument {
        StoredDocument {
            address: Some(address),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StoredValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: StoredValue) {
        self.fields.insert(name.into(), value);
    }
}

/// A caller-specified set of stored field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: AHashSet<String>,
}

impl FieldSet {
    pub fn new<I, S>(names: I) -> FieldSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The fields needed to render a record header: identifier, stamp,
    /// set memberships and the tombstone flag.
    pub fn record_header() -> FieldSet {
        FieldSet::new([
            IDENTIFIER_FIELD,
            crate::STAMP_FIELD,
            SETS_FIELD,
            TOMBSTONE_FIELD,
        ])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Reads stored fields of individual documents.
pub trait StoredFieldReader {
    /// Returns the stored values of `fields` for the document at `address`.
    ///
    /// Fields the document does not store are absent from the returned
    /// document; it is up to the caller to decide whether that is an error.
    fn document(&self, address: DocAddress, fields: &FieldSet) -> Result<StoredDocument>;
}
