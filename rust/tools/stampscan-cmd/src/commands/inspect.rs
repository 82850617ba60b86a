//! Inspect command implementation

use anyhow::Result;
use serde::Serialize;

use stampscan_collector::datestamp::stamp_to_datestamp;
use stampscan_index_core::SegmentReader;
use stampscan_memory_index::MemoryIndex;

use crate::utils;

#[derive(Serialize, Debug)]
struct InspectSummary {
    record_count: u64,
    segment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_stamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_datestamp: Option<String>,
    prefixes: Vec<PrefixInfo>,
    sets: Vec<String>,
    segments: Vec<SegmentInfo>,
}

#[derive(Serialize, Debug)]
struct RecordDetail {
    identifier: String,
    stamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    datestamp: Option<String>,
    sets: Vec<String>,
    prefixes: Vec<String>,
    deleted: bool,
}

#[derive(Serialize, Debug)]
struct PrefixInfo {
    prefix: String,
    record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_stamp: Option<i64>,
}

#[derive(Serialize, Debug)]
struct SegmentInfo {
    ordinal: u32,
    doc_base: u64,
    doc_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_stamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_stamp: Option<i64>,
}

/// Run the inspect command
pub fn run(records: String, segment_size: usize, identifier: Option<String>) -> Result<()> {
    let index = utils::load_index(&records, segment_size)?;
    let json = match identifier {
        Some(identifier) => serde_json::to_string_pretty(&describe(&index, &identifier)?)?,
        None => serde_json::to_string_pretty(&inspect(&index))?,
    };
    println!("{json}");
    Ok(())
}

fn describe(index: &MemoryIndex, identifier: &str) -> Result<RecordDetail> {
    let Some(stamp) = index.stamp_of(identifier) else {
        anyhow::bail!("No record with identifier {identifier}");
    };
    Ok(RecordDetail {
        identifier: identifier.to_string(),
        stamp,
        datestamp: stamp_to_datestamp(stamp, false),
        sets: index.sets_of(identifier).to_vec(),
        prefixes: index.prefixes_of(identifier).to_vec(),
        deleted: index.is_deleted(identifier),
    })
}

fn inspect(index: &MemoryIndex) -> InspectSummary {
    let last_stamp = index.last_stamp(None);
    let prefixes = index
        .prefixes()
        .into_iter()
        .map(|prefix| PrefixInfo {
            prefix: prefix.to_string(),
            record_count: index.record_count(Some(prefix)),
            last_stamp: index.last_stamp(Some(prefix)),
        })
        .collect();
    let segments = index
        .memory_segments()
        .iter()
        .map(|segment| {
            let extrema = segment.stamp_extrema();
            SegmentInfo {
                ordinal: segment.ordinal(),
                doc_base: segment.doc_base(),
                doc_count: segment.doc_count(),
                min_stamp: extrema.map(|e| e.min),
                max_stamp: extrema.map(|e| e.max),
            }
        })
        .collect::<Vec<_>>();

    InspectSummary {
        record_count: index.doc_count(),
        segment_count: segments.len(),
        last_stamp,
        last_datestamp: last_stamp.and_then(|stamp| stamp_to_datestamp(stamp, false)),
        prefixes,
        sets: index.sets().into_iter().map(str::to_string).collect(),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use stampscan_memory_index::Record;
    use stampscan_testkit::data_gen::write_ndjson;

    use super::*;

    #[test]
    fn test_inspect_layout() {
        let records = vec![
            Record::new("a", 3_000_000).with_prefixes(["oai_dc"]),
            Record::new("b", 1_000_000)
                .with_prefixes(["oai_dc", "marc"])
                .with_sets(["x:y"]),
            Record::new("c", 2_000_000),
        ];
        let file = write_ndjson(&records).unwrap();
        let index = utils::load_index(file.path().to_str().unwrap(), 2).unwrap();
        let summary = inspect(&index);

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.segment_count, 2);
        assert_eq!(summary.last_datestamp.as_deref(), Some("1970-01-01T00:00:03Z"));
        assert_eq!(summary.segments[0].min_stamp, Some(1_000_000));
        assert_eq!(summary.segments[0].max_stamp, Some(2_000_000));
        assert_eq!(summary.segments[1].doc_base, 2);
        let prefixes = summary
            .prefixes
            .iter()
            .map(|p| (p.prefix.as_str(), p.record_count))
            .collect::<Vec<_>>();
        assert_eq!(prefixes, vec![("marc", 1), ("oai_dc", 2)]);
        assert_eq!(summary.sets, vec!["x", "x:y"]);
    }

    #[test]
    fn test_describe_record() {
        let records = vec![
            Record::new("a", 3_000_000).with_tombstone(true),
            Record::new("b", 1_000_000)
                .with_prefixes(["oai_dc"])
                .with_sets(["x:y"]),
        ];
        let file = write_ndjson(&records).unwrap();
        let index = utils::load_index(file.path().to_str().unwrap(), 1).unwrap();

        let detail = describe(&index, "b").unwrap();
        assert_eq!(detail.stamp, 1_000_000);
        assert_eq!(detail.datestamp.as_deref(), Some("1970-01-01T00:00:01Z"));
        assert_eq!(detail.sets, vec!["x", "x:y"]);
        assert_eq!(detail.prefixes, vec!["oai_dc"]);
        assert!(!detail.deleted);
        assert!(describe(&index, "a").unwrap().deleted);
        assert!(describe(&index, "missing").is_err());
    }
}
