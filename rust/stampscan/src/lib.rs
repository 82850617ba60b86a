//! # Stampscan: range-bounded, stamp-ordered collection
//!
//! Stampscan retrieves the first page of documents from a segmented index
//! ordered by a monotonic per-document *stamp*: at most K documents whose stamp
//! lies in an inclusive window, ascending by stamp, together with the number of
//! in-range matches and whether more than K exist.
//!
//! ## Key Features
//!
//! * **Segment pruning**: per-segment stamp extrema let whole segments be
//!   skipped, and the first segment above the window ends the scan
//! * **Early termination**: the scan stops at the first stamp above the window,
//!   or once more than K matches were seen when an exact count is not needed
//! * **Bounded memory**: retention is a bounded max-heap of K entries
//! * **Explicit accuracy**: counts cut short by early termination are tagged as
//!   lower bounds
//!
//! ## Module Organization
//!
//! * [`collector`] - The collection algorithm, its configuration and results
//! * [`common`] - Error and result types shared across components
//! * [`index_core`] - The interfaces through which the collector reads an index
//! * [`memory_index`] - An in-memory segmented index implementing those
//!   interfaces
//!
//! ## Getting Started
//!
//! ```ignore
//! use stampscan::collector::{CollectionWindow, CollectorOptions, driver};
//! use stampscan::index_core::MatchAll;
//!
//! let options = CollectorOptions::new(100, CollectionWindow::new(start, stop)?)
//!     .with_count_exhaustively(true);
//! let result = driver::collect(&index, &MatchAll, &options)?;
//! ```

pub use stampscan_collector as collector;
pub use stampscan_common as common;
pub use stampscan_index_core as index_core;
pub use stampscan_memory_index as memory_index;
