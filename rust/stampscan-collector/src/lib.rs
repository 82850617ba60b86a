//! Range-bounded, stamp-ordered result collection over a segmented index.
//!
//! Given a query matching an unbounded set of documents, the collector keeps at
//! most K documents whose stamp lies in an inclusive window `[start, stop]`,
//! ordered ascending by stamp, and reports how many in-range documents matched
//! in total and whether more than K exist.
//!
//! # Architecture
//!
//! A collection is one synchronous pass over the segments of a
//! [`StampIndex`](stampscan_index_core::StampIndex), composed of:
//!
//! - [`SegmentGate`]: uses per-segment stamp extrema to skip segments below the
//!   window and to end the scan at the first segment above it
//! - [`RangeCounter`]: classifies every visited stamp and maintains the hit
//!   count and the "more records available" flag
//! - [`BoundedOrderedCollector`]: retains the K smallest in-range stamps
//! - [`StampCollector`]: the per-document composition of the two above, driven
//!   through an explicit [`ScanState`] machine
//! - [`driver`]: the scan loop itself
//!
//! Early termination is not an error. It is reported as a [`Termination`]
//! value, and when it cuts counting short the total count is tagged as a lower
//! bound (see [`HitCount`]).
//!
//! # Example
//!
//! ```ignore
//! let options = CollectorOptions::new(200, CollectionWindow::new(start, stop)?)
//!     .with_count_exhaustively(true);
//! let result = driver::collect(&index, &MatchAll, &options)?;
//! let headers = materialize::record_headers(&index, &result)?;
//! ```

pub mod bounded;
pub mod collector;
pub mod control;
pub mod datestamp;
pub mod driver;
pub mod gate;
pub mod materialize;
pub mod options;
pub mod result;
pub mod selection;
pub mod state;
pub mod window;

mod counter;

pub use bounded::{BoundedOrderedCollector, Offer};
pub use collector::StampCollector;
pub use control::{Deadline, ScanControl, Unbounded};
pub use counter::{RangeClass, RangeCounter};
pub use gate::{GateDecision, SegmentGate, should_skip_segment};
pub use options::CollectorOptions;
pub use result::{CollectedDoc, CollectionResult, HitCount, Remaining, ScanStats, Termination};
pub use selection::SelectionWindow;
pub use state::ScanState;
pub use window::CollectionWindow;
