use serde::{Deserialize, Serialize};
use stampscan_common::{Result, error::Error, verify_arg};

/// Inclusive stamp window `[start, stop]`.
///
/// Construction rejects `start > stop`, so every window value denotes a
/// non-empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds", into = "WindowBounds")]
pub struct CollectionWindow {
    start: i64,
    stop: i64,
}

impl CollectionWindow {
    pub fn new(start: i64, stop: i64) -> Result<CollectionWindow> {
        verify_arg!(window, start <= stop);
        Ok(CollectionWindow { start, stop })
    }

    /// The window covering every representable stamp.
    pub const fn unbounded() -> CollectionWindow {
        CollectionWindow {
            start: i64::MIN,
            stop: i64::MAX,
        }
    }

    /// Window covering stamps `>= start`.
    pub const fn starting_at(start: i64) -> CollectionWindow {
        CollectionWindow {
            start,
            stop: i64::MAX,
        }
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> i64 {
        self.stop
    }

    #[inline]
    pub fn contains(&self, stamp: i64) -> bool {
        self.start <= stamp && stamp <= self.stop
    }
}

impl Default for CollectionWindow {
    fn default() -> Self {
        CollectionWindow::unbounded()
    }
}

impl std::fmt::Display for CollectionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

#[derive(Serialize, Deserialize)]
struct WindowBounds {
    #[serde(default = "min_stamp")]
    start: i64,
    #[serde(default = "max_stamp")]
    stop: i64,
}

fn min_stamp() -> i64 {
    i64::MIN
}

fn max_stamp() -> i64 {
    i64::MAX
}

impl TryFrom<WindowBounds> for CollectionWindow {
    type Error = Error;

    fn try_from(bounds: WindowBounds) -> Result<Self> {
        CollectionWindow::new(bounds.start, bounds.stop)
    }
}

impl From<CollectionWindow> for WindowBounds {
    fn from(window: CollectionWindow) -> Self {
        WindowBounds {
            start: window.start,
            stop: window.stop,
        }
    }
}
