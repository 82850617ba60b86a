use crate::{DocId, SegmentOrd};

/// Instrumentation hook notified by a segment whenever a document stamp is
/// read.
///
/// Observers are shared between an index and the code inspecting it, hence
/// the `Send + Sync` bound; implementations typically use atomics.
pub trait ReadObserver: Send + Sync {
    fn on_stamp_read(&self, segment: SegmentOrd, doc: DocId);
}
