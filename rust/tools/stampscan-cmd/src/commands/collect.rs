//! Collect command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

use stampscan_collector::{
    CollectionResult, CollectionWindow, CollectorOptions, HitCount, ScanStats, SelectionWindow,
    Termination, driver,
    materialize::{self, RecordHeader},
};
use stampscan_memory_index::{MemoryIndex, RecordFilter};

use crate::{CollectArgs, utils};

const DEFAULT_MAX_DOCS: usize = 100;

#[derive(Serialize, Debug)]
struct CollectSummary {
    /// Absent when the selection cannot match anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<CollectionWindow>,
    total: HitCount,
    more_available: bool,
    /// `-1` when unknown.
    remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    termination: Option<Termination>,
    /// Stamp to pass as `--continue-after` for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    continue_after: Option<i64>,
    stats: ScanStats,
    records: Vec<RecordInfo>,
}

#[derive(Serialize, Debug)]
struct RecordInfo {
    identifier: String,
    stamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    datestamp: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sets: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    deleted: bool,
}

impl RecordInfo {
    fn new(header: RecordHeader, precise: bool) -> RecordInfo {
        RecordInfo {
            datestamp: header.datestamp(precise),
            identifier: header.identifier,
            stamp: header.stamp,
            sets: header.sets,
            deleted: header.tombstone,
        }
    }
}

/// Run the collect command
pub fn run(args: CollectArgs) -> Result<()> {
    let summary = collect(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn collect(args: &CollectArgs) -> Result<CollectSummary> {
    let index = utils::load_index(&args.records, args.segment_size)?;
    let filter = build_filter(args);
    let base = load_options(args.options.as_deref())?;

    let Some(window) = resolve_window(args, base.window)? else {
        log::info!("selection window is empty");
        let result = CollectionResult::empty(args.count_hits || base.count_exhaustively);
        return summarize(&index, None, result, args.precise);
    };
    let options = base
        .with_window(window)
        .with_max_docs_to_collect(args.max_docs.unwrap_or(base.max_docs_to_collect))
        .with_count_exhaustively(args.count_hits || base.count_exhaustively);

    let result =
        driver::collect(&index, &filter, &options).context("Failed to collect records")?;
    summarize(&index, Some(window), result, args.precise)
}

fn summarize(
    index: &MemoryIndex,
    window: Option<CollectionWindow>,
    result: CollectionResult,
    precise: bool,
) -> Result<CollectSummary> {
    let records = materialize::record_headers(index, &result)
        .context("Failed to materialize record headers")?
        .into_iter()
        .map(|header| RecordInfo::new(header, precise))
        .collect();
    Ok(CollectSummary {
        window,
        total: result.total,
        more_available: result.more_available,
        remaining: result.remaining.as_i64(),
        termination: result.termination,
        continue_after: result.continuation(),
        stats: result.stats,
        records,
    })
}

fn load_options(path: Option<&str>) -> Result<CollectorOptions> {
    let Some(path) = path else {
        return Ok(CollectorOptions::new(
            DEFAULT_MAX_DOCS,
            CollectionWindow::unbounded(),
        ));
    };
    utils::validate_file_exists(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid collector options in {path}"))
}

/// Explicit stamps win over a datestamp selection, which wins over the window
/// of the options file. `None` means the selection cannot match anything.
fn resolve_window(
    args: &CollectArgs,
    configured: CollectionWindow,
) -> Result<Option<CollectionWindow>> {
    if args.start.is_some() || args.stop.is_some() {
        let window = CollectionWindow::new(
            args.start.unwrap_or(i64::MIN),
            args.stop.unwrap_or(i64::MAX),
        )
        .context("Invalid stamp window")?;
        return Ok(Some(window));
    }
    if args.from.is_some() || args.until.is_some() || args.continue_after.is_some() {
        let selection = SelectionWindow {
            continue_after: args.continue_after,
            from: args.from.clone(),
            until: args.until.clone(),
        };
        return Ok(selection.resolve());
    }
    Ok(Some(configured))
}

fn build_filter(args: &CollectArgs) -> RecordFilter {
    let filter = RecordFilter::new().with_sets(args.set.iter().cloned());
    match &args.prefix {
        Some(prefix) => filter.with_prefix(prefix.clone()),
        None => filter,
    }
}
