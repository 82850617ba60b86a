//! Synthetic record generation.

use std::io::{Seek, SeekFrom, Write};

use stampscan_memory_index::Record;

/// Set names drawn from when assigning set memberships.
pub const SETS: [&str; 4] = ["physics", "physics:optics", "math", "cs"];

/// Metadata prefixes drawn from when assigning formats.
pub const PREFIXES: [&str; 2] = ["oai_dc", "marc"];

/// Shape of the generated data.
#[derive(Debug, Clone)]
pub struct DataShape {
    pub segment_count: usize,
    /// Each segment holds between zero and this many records.
    pub max_segment_len: usize,
    /// Stamps grow by a random step in `0..=max_stamp_step`; zero steps
    /// produce duplicate stamps.
    pub max_stamp_step: i64,
    pub first_stamp: i64,
}

impl Default for DataShape {
    fn default() -> Self {
        DataShape {
            segment_count: 6,
            max_segment_len: 40,
            max_stamp_step: 3,
            first_stamp: 1,
        }
    }
}

/// Generates segments whose stamps are non-decreasing across the whole
/// sequence, as an index with index sorting would hold them.
///
/// The same seed always yields the same data.
pub fn generate_segments(seed: u64, shape: &DataShape) -> Vec<Vec<Record>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut stamp = shape.first_stamp;
    let mut next_id = 0usize;
    (0..shape.segment_count)
        .map(|_| {
            let len = rng.usize(0..=shape.max_segment_len);
            (0..len)
                .map(|_| {
                    stamp += rng.i64(0..=shape.max_stamp_step);
                    next_id += 1;
                    random_record(&mut rng, next_id, stamp)
                })
                .collect()
        })
        .collect()
}

/// Returns the total number of records over `segments`.
pub fn record_count(segments: &[Vec<Record>]) -> usize {
    segments.iter().map(Vec::len).sum()
}

/// Writes `records` as ndjson into a temporary file positioned at its start.
pub fn write_ndjson(records: &[Record]) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    for record in records {
        serde_json::to_writer(&mut file, record)?;
        file.write_all(b"\n")?;
    }
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

fn random_record(rng: &mut fastrand::Rng, id: usize, stamp: i64) -> Record {
    let sets = SETS
        .iter()
        .filter(|_| rng.u8(0..4) == 0)
        .copied()
        .collect::<Vec<_>>();
    let prefixes = PREFIXES
        .iter()
        .filter(|_| rng.bool())
        .copied()
        .collect::<Vec<_>>();
    Record::new(format!("oai:test:{id}"), stamp)
        .with_sets(sets)
        .with_prefixes(prefixes)
        .with_tombstone(rng.u8(0..10) == 0)
}
