//! In-memory segmented stamp index.
//!
//! [`MemoryIndex`] implements the `stampscan-index-core` interfaces over plain
//! vectors of [`Record`]s. Segments are sorted by stamp when they are added and
//! carry precomputed stamp extrema, mirroring what an on-disk index with index
//! sorting and per-segment statistics would offer.
//!
//! The crate is used by the command-line tool and by tests; it is not meant to
//! be a durable index.

pub mod builder;
pub mod filter;
pub mod index;
pub mod read_counter;
pub mod record;
pub mod segment;
pub mod stats;

pub use builder::MemoryIndexBuilder;
pub use filter::RecordFilter;
pub use index::MemoryIndex;
pub use read_counter::ReadCounter;
pub use record::{Record, read_ndjson};
pub use segment::MemorySegment;
