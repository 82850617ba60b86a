use serde::{Deserialize, Serialize};

use crate::window::CollectionWindow;

/// Configuration of a single collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorOptions {
    /// Capacity K of the ordered result. Zero is allowed: nothing is kept,
    /// matches are only counted.
    pub max_docs_to_collect: usize,

    /// Keep scanning after more than K in-range documents were seen, so that
    /// the reported total is exact.
    #[serde(default)]
    pub count_exhaustively: bool,

    #[serde(default)]
    pub window: CollectionWindow,
}

impl CollectorOptions {
    pub fn new(max_docs_to_collect: usize, window: CollectionWindow) -> CollectorOptions {
        CollectorOptions {
            max_docs_to_collect,
            count_exhaustively: false,
            window,
        }
    }

    pub fn with_count_exhaustively(mut self, count_exhaustively: bool) -> Self {
        self.count_exhaustively = count_exhaustively;
        self
    }

    pub fn with_window(mut self, window: CollectionWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_max_docs_to_collect(mut self, max_docs_to_collect: usize) -> Self {
        self.max_docs_to_collect = max_docs_to_collect;
        self
    }
}
