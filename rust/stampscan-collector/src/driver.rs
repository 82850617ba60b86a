//! The segment-by-segment scan loop.

use log::debug;
use stampscan_common::{Result, error::Error, result::StampOptionExt};
use stampscan_index_core::{DocAddress, DocMatcher, SegmentOrd, StampIndex};

use crate::{
    collector::StampCollector,
    control::{ScanControl, Unbounded},
    gate::{GateDecision, SegmentGate},
    options::CollectorOptions,
    result::{CollectionResult, Termination},
    selection::SelectionWindow,
};

/// Collects the documents of `index` matched by `matcher` whose stamp lies in
/// the configured window.
///
/// # Errors
///
/// Fails when a scanned segment has no stamp column, when a matching document
/// has no stamp, or when the matcher fails. Early termination is not an error:
/// it is reported through [`CollectionResult::termination`].
pub fn collect(
    index: &dyn StampIndex,
    matcher: &dyn DocMatcher,
    options: &CollectorOptions,
) -> Result<CollectionResult> {
    collect_with_control(index, matcher, options, &mut Unbounded)
}

/// Like [`collect`], consulting `control` before every visited document.
pub fn collect_with_control(
    index: &dyn StampIndex,
    matcher: &dyn DocMatcher,
    options: &CollectorOptions,
    control: &mut dyn ScanControl,
) -> Result<CollectionResult> {
    let gate = SegmentGate::new(options.window);
    let mut collector = StampCollector::new(options);

    'segments: for ord in 0..index.segment_count() as SegmentOrd {
        let segment = index
            .segment(ord)
            .ok_or_else(|| Error::invalid_operation(format!("segment {ord} out of range")))?;

        match gate.decide(segment.stamp_extrema(), segment.doc_count()) {
            GateDecision::Scan => {}
            GateDecision::Skip => {
                collector.skip_segment(ord);
                continue;
            }
            GateDecision::Terminate => {
                debug!("segment {ord} lies above {}", options.window);
                collector.terminate(Termination::SegmentAboveWindow)?;
                break;
            }
        }

        collector.set_segment(ord)?;
        let doc_count = segment.doc_count();
        if doc_count == 0 {
            continue;
        }
        let stamps = segment.stamps()?;
        for doc in 0..doc_count {
            if !control.should_continue() {
                collector.terminate(Termination::Cancelled)?;
                break 'segments;
            }
            if !matcher.matches(segment, doc)? {
                continue;
            }
            let stamp = stamps.get(doc).or_missing_stamp(ord, doc)?;
            if collector
                .collect(DocAddress::new(ord, doc), stamp)
                .is_break()
            {
                break 'segments;
            }
        }
    }

    let result = collector.finish();
    debug!(
        "collected {} documents, total {:?}, {:?}",
        result.documents.len(),
        result.total,
        result.stats
    );
    Ok(result)
}

/// Resolves a harvesting request into a window and collects it.
///
/// A request whose window is empty selects nothing and does not touch the
/// index.
pub fn collect_selection(
    index: &dyn StampIndex,
    matcher: &dyn DocMatcher,
    selection: &SelectionWindow,
    max_docs_to_collect: usize,
    count_exhaustively: bool,
) -> Result<CollectionResult> {
    let Some(window) = selection.resolve() else {
        debug!("empty selection window {selection:?}");
        return Ok(CollectionResult::empty(count_exhaustively));
    };
    let options = CollectorOptions::new(max_docs_to_collect, window)
        .with_count_exhaustively(count_exhaustively);
    collect(index, matcher, &options)
}
