//! Derivation of a collection window from a harvesting request.
//!
//! A harvesting client asks for records changed since a datestamp (`from`), up
//! to a datestamp (`until`), and resumes a previous page by passing the stamp
//! of the last record it received (`continue_after`).

use serde::{Deserialize, Serialize};

use crate::{
    datestamp::{DATESTAMP_FACTOR, datestamp_to_stamp},
    window::CollectionWindow,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionWindow {
    /// Stamp of the last record already delivered; collection resumes after it.
    #[serde(default)]
    pub continue_after: Option<i64>,
    /// Lower datestamp bound, inclusive.
    #[serde(default)]
    pub from: Option<String>,
    /// Upper datestamp bound, inclusive at second granularity.
    #[serde(default)]
    pub until: Option<String>,
}

impl SelectionWindow {
    pub fn new() -> SelectionWindow {
        SelectionWindow::default()
    }

    pub fn with_continue_after(mut self, stamp: i64) -> Self {
        self.continue_after = Some(stamp);
        self
    }

    pub fn with_from(mut self, datestamp: impl Into<String>) -> Self {
        self.from = Some(datestamp.into());
        self
    }

    pub fn with_until(mut self, datestamp: impl Into<String>) -> Self {
        self.until = Some(datestamp.into());
        self
    }

    /// Resolves the request into a stamp window.
    ///
    /// - `start` is the larger of `continue_after + 1` (0 + 1 when absent) and
    ///   the stamp of `from`.
    /// - `stop` is the last microsecond of the `until` second, or `i64::MAX`.
    ///
    /// An unparseable datestamp resolves to the largest stamp, so an invalid
    /// `from` pushes the window past every real stamp and an invalid `until`
    /// leaves it open.
    ///
    /// Returns `None` when the resulting window is empty.
    pub fn resolve(&self) -> Option<CollectionWindow> {
        let resume = self.continue_after.unwrap_or(0).saturating_add(1);
        let from = self.from.as_deref().map(parse_or_max).unwrap_or(0);
        let start = resume.max(from);
        let stop = self
            .until
            .as_deref()
            .map(|until| parse_or_max(until).saturating_add(DATESTAMP_FACTOR - 1))
            .unwrap_or(i64::MAX);
        CollectionWindow::new(start, stop).ok()
    }
}

fn parse_or_max(datestamp: &str) -> i64 {
    datestamp_to_stamp(datestamp).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAN_2: i64 = 1_357_084_800 * DATESTAMP_FACTOR;

    #[test]
    fn test_default_selection() {
        let window = SelectionWindow::new().resolve().unwrap();
        assert_eq!(window.start(), 1);
        assert_eq!(window.stop(), i64::MAX);
    }

    #[test]
    fn test_from_until() {
        let window = SelectionWindow::new()
            .with_from("2013-01-02T00:00:00Z")
            .with_until("2013-01-02T00:00:00Z")
            .resolve()
            .unwrap();
        assert_eq!(window.start(), JAN_2);
        assert_eq!(window.stop(), JAN_2 + DATESTAMP_FACTOR - 1);
    }

    #[test]
    fn test_until_stops_at_second_boundary() {
        let window = SelectionWindow::new()
            .with_until("2013-01-02T00:00:00Z")
            .resolve()
            .unwrap();
        assert!(window.contains(JAN_2));
        assert!(window.contains(JAN_2 + 999_999));
        assert!(!window.contains(JAN_2 + DATESTAMP_FACTOR));
    }

    #[test]
    fn test_continue_after_overrides_older_from() {
        let window = SelectionWindow::new()
            .with_from("2013-01-02T00:00:00Z")
            .with_continue_after(JAN_2 + 10)
            .resolve()
            .unwrap();
        assert_eq!(window.start(), JAN_2 + 11);

        let window = SelectionWindow::new()
            .with_from("2013-01-02T00:00:00Z")
            .with_continue_after(5)
            .resolve()
            .unwrap();
        assert_eq!(window.start(), JAN_2);
    }

    #[test]
    fn test_empty_and_invalid_selections() {
        assert_eq!(
            SelectionWindow::new()
                .with_from("2013-01-03T00:00:00Z")
                .with_until("2013-01-02T00:00:00Z")
                .resolve(),
            None
        );
        let closed = SelectionWindow::new().with_from("garbage").resolve().unwrap();
        assert_eq!(closed.start(), i64::MAX);
        let open = SelectionWindow::new().with_until("garbage").resolve().unwrap();
        assert_eq!(open.stop(), i64::MAX);
        assert_eq!(
            SelectionWindow::new().with_continue_after(i64::MAX).resolve(),
            Some(CollectionWindow::new(i64::MAX, i64::MAX).unwrap())
        );
    }
}
