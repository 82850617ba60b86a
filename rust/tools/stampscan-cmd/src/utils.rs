//! Common utilities for stampscan-cmd

use anyhow::{Context, Result};
use std::{fs::File, io::BufReader, path::Path};

use stampscan_memory_index::{MemoryIndex, MemoryIndexBuilder, Record, read_ndjson};

pub const DEFAULT_SEGMENT_SIZE: usize = 1000;

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads one JSON record per line; blank lines are ignored.
pub fn load_records(path: &str) -> Result<Vec<Record>> {
    validate_file_exists(path)?;
    let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
    read_ndjson(BufReader::new(file), path).with_context(|| format!("Failed to load {path}"))
}

/// Loads a record file into an in-memory index with segments of at most
/// `segment_size` records.
pub fn load_index(path: &str, segment_size: usize) -> Result<MemoryIndex> {
    let records = load_records(path)?;
    let record_count = records.len();
    let mut builder = MemoryIndexBuilder::new();
    builder
        .add_records(records, segment_size)
        .context("Failed to build index")?;
    log::info!(
        "loaded {record_count} records from {path} into {} segments",
        builder.segment_count()
    );
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use stampscan_index_core::StampIndex;
    use stampscan_testkit::data_gen::write_ndjson;

    use super::*;

    #[test]
    fn test_load_index() {
        let records = (0..5)
            .map(|i| Record::new(format!("oai:{i}"), 50 - i * 10))
            .collect::<Vec<_>>();
        let file = write_ndjson(&records).unwrap();
        let path = file.path().to_str().unwrap();
        let index = load_index(path, 2).unwrap();
        assert_eq!(index.segment_count(), 3);
        assert_eq!(index.last_stamp(None), Some(50));
    }

    #[test]
    fn test_invalid_record_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"identifier":"a","stamp":1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"identifier":"b"}}"#).unwrap();
        let err = load_records(file.path().to_str().unwrap()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(":3'"), "{message}");
    }

    #[test]
    fn test_missing_file() {
        assert!(validate_file_exists("/nonexistent/records.ndjson").is_err());
    }
}
