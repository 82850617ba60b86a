use std::io::BufRead;

use serde::{Deserialize, Serialize};
use stampscan_common::{Result, error::Error};

/// Separator between the levels of a hierarchical set specification.
pub const SET_LEVEL_SEPARATOR: char = ':';

/// A single document of the in-memory index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identifier: String,
    pub stamp: i64,
    #[serde(default)]
    pub sets: Vec<String>,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub tombstone: bool,
}

impl Record {
    pub fn new(identifier: impl Into<String>, stamp: i64) -> Record {
        Record {
            identifier: identifier.into(),
            stamp,
            sets: Vec::new(),
            prefixes: Vec::new(),
            tombstone: false,
        }
    }

    pub fn with_sets<I, S>(mut self, sets: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets = sets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tombstone(mut self, tombstone: bool) -> Record {
        self.tombstone = tombstone;
        self
    }

    /// Expands hierarchical set specifications so that membership in `a:b:c`
    /// implies membership in `a:b` and `a`.
    pub(crate) fn flatten_sets(&mut self) {
        self.sets = flatten_set_hierarchy(&self.sets);
    }
}

/// `["1:2:3", "1:2:4"]` becomes `["1", "1:2", "1:2:3", "1:2:4"]`.
pub fn flatten_set_hierarchy(sets: &[String]) -> Vec<String> {
    let mut result = sets
        .iter()
        .flat_map(|spec| {
            spec.match_indices(SET_LEVEL_SEPARATOR)
                .map(move |(pos, _)| spec[..pos].to_string())
                .chain(std::iter::once(spec.clone()))
        })
        .collect::<Vec<_>>();
    result.sort();
    result.dedup();
    result
}

/// Reads newline-delimited JSON records from `reader`; blank lines are
/// skipped. `source` names the input in error messages.
pub fn read_ndjson<R: BufRead>(reader: R, source: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(source, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str::<Record>(&line).map_err(|e| {
            Error::invalid_format(format!("{source}:{}", line_no + 1), e.to_string())
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use stampscan_common::error::ErrorKind;

    use super::*;

    #[test]
    fn test_flatten_set_hierarchy() {
        let sets = vec!["1:2:3".to_string(), "1:2:4".to_string()];
        assert_eq!(flatten_set_hierarchy(&sets), vec!["1", "1:2", "1:2:3", "1:2:4"]);
        assert!(flatten_set_hierarchy(&[]).is_empty());
    }

    #[test]
    fn test_record_from_json() {
        let record: Record = serde_json::from_str(r#"{"identifier":"id:1","stamp":12}"#).unwrap();
        assert_eq!(record, Record::new("id:1", 12));
        let record: Record = serde_json::from_str(
            r#"{"identifier":"id:2","stamp":13,"sets":["a"],"prefixes":["oai_dc"],"tombstone":true}"#,
        )
        .unwrap();
        assert_eq!(
            record,
            Record::new("id:2", 13)
                .with_sets(["a"])
                .with_prefixes(["oai_dc"])
                .with_tombstone(true)
        );
    }

    #[test]
    fn test_read_ndjson() {
        let input = "{\"identifier\":\"a\",\"stamp\":1}\n\n{\"identifier\":\"b\",\"stamp\":2,\"sets\":[\"x\"]}\n";
        let records = read_ndjson(input.as_bytes(), "input").unwrap();
        assert_eq!(
            records,
            vec![Record::new("a", 1), Record::new("b", 2).with_sets(["x"])]
        );

        let err = read_ndjson("{\"identifier\":\"a\"}\n".as_bytes(), "input").unwrap_err();
        match err.kind() {
            ErrorKind::InvalidFormat { element, .. } => assert_eq!(element, "input:1"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_read_ndjson_io_failure() {
        struct Broken;

        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let err = read_ndjson(std::io::BufReader::new(Broken), "records.ndjson").unwrap_err();
        match err.kind() {
            ErrorKind::Io { context, source } => {
                assert_eq!(context, "records.ndjson");
                assert_eq!(source.to_string(), "disk gone");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
