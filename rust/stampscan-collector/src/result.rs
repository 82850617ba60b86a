//! The result surface of a collection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use stampscan_index_core::DocAddress;

/// A kept document: its reference and its stamp.
///
/// Orders by stamp, then by address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedDoc {
    pub address: DocAddress,
    pub stamp: i64,
}

impl Ord for CollectedDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stamp
            .cmp(&other.stamp)
            .then_with(|| self.address.cmp(&other.address))
    }
}

impl PartialOrd for CollectedDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of in-range documents seen, tagged with its accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "accuracy", content = "count", rename_all = "snake_case")]
pub enum HitCount {
    /// Every in-range document was counted.
    Exact(u64),
    /// Counting stopped early; the true count is at least this value.
    LowerBound(u64),
}

impl HitCount {
    pub fn value(&self) -> u64 {
        match self {
            HitCount::Exact(count) | HitCount::LowerBound(count) => *count,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, HitCount::Exact(_))
    }
}

/// Number of in-range documents beyond the retained ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remaining {
    Known(u64),
    Unknown,
}

impl Remaining {
    pub fn known(&self) -> Option<u64> {
        match self {
            Remaining::Known(count) => Some(*count),
            Remaining::Unknown => None,
        }
    }

    /// The count with `-1` standing for "unknown".
    pub fn as_i64(&self) -> i64 {
        match self {
            Remaining::Known(count) => i64::try_from(*count).unwrap_or(i64::MAX),
            Remaining::Unknown => -1,
        }
    }
}

impl From<Option<u64>> for Remaining {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Remaining::Unknown, Remaining::Known)
    }
}

/// Why a scan ended before visiting every segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A visited document had a stamp above the window.
    StampAboveWindow,
    /// A segment's smallest stamp was above the window.
    SegmentAboveWindow,
    /// More than K in-range documents were seen without exhaustive counting.
    CapacityExceeded,
    /// The scan control requested to stop.
    Cancelled,
}

impl Termination {
    /// Whether in-range documents may have been left uncounted.
    pub fn truncates_count(&self) -> bool {
        matches!(self, Termination::CapacityExceeded | Termination::Cancelled)
    }
}

/// Work performed by a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub segments_scanned: u32,
    pub segments_skipped: u32,
    pub docs_visited: u64,
}

/// Outcome of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    /// At most K documents, ascending by stamp.
    pub documents: Vec<CollectedDoc>,
    pub total: HitCount,
    pub more_available: bool,
    pub remaining: Remaining,
    /// `None` when the scan ran through every segment.
    pub termination: Option<Termination>,
    pub stats: ScanStats,
}

impl CollectionResult {
    /// The result of a collection that selects nothing.
    pub fn empty(count_exhaustively: bool) -> CollectionResult {
        CollectionResult {
            documents: Vec::new(),
            total: HitCount::Exact(0),
            more_available: false,
            remaining: if count_exhaustively {
                Remaining::Known(0)
            } else {
                Remaining::Unknown
            },
            termination: None,
            stats: ScanStats::default(),
        }
    }

    pub fn addresses(&self) -> impl Iterator<Item = DocAddress> + '_ {
        self.documents.iter().map(|doc| doc.address)
    }

    pub fn stamps(&self) -> Vec<i64> {
        self.documents.iter().map(|doc| doc.stamp).collect()
    }

    /// Stamp of the last returned document, from which a follow-up page
    /// continues.
    pub fn continuation(&self) -> Option<i64> {
        self.more_available
            .then(|| self.documents.last().map(|doc| doc.stamp))
            .flatten()
    }
}
