//! Cooperative cancellation of a running scan.

use std::time::{Duration, Instant};

/// Checked by the driver once per visited document.
///
/// Returning `false` ends the scan with
/// [`Termination::Cancelled`](crate::Termination::Cancelled); the documents
/// retained so far are still returned and the count becomes a lower bound.
pub trait ScanControl {
    fn should_continue(&mut self) -> bool;
}

/// Never interrupts a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl ScanControl for Unbounded {
    #[inline]
    fn should_continue(&mut self) -> bool {
        true
    }
}

/// Interrupts a scan once a point in time has passed.
///
/// The clock is consulted only every `check_interval` documents.
#[derive(Debug, Clone)]
pub struct Deadline {
    deadline: Instant,
    check_interval: u32,
    countdown: u32,
    expired: bool,
}

impl Deadline {
    pub const DEFAULT_CHECK_INTERVAL: u32 = 1024;

    pub fn at(deadline: Instant) -> Deadline {
        Deadline {
            deadline,
            check_interval: Self::DEFAULT_CHECK_INTERVAL,
            countdown: 0,
            expired: false,
        }
    }

    pub fn after(timeout: Duration) -> Deadline {
        Self::at(Instant::now() + timeout)
    }

    pub fn with_check_interval(mut self, check_interval: u32) -> Self {
        self.check_interval = check_interval.max(1);
        self.countdown = 0;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

impl ScanControl for Deadline {
    fn should_continue(&mut self) -> bool {
        if self.expired {
            return false;
        }
        if self.countdown == 0 {
            self.countdown = self.check_interval;
            self.expired = Instant::now() >= self.deadline;
        }
        self.countdown -= 1;
        !self.expired
    }
}

impl<F> ScanControl for F
where
    F: FnMut() -> bool,
{
    fn should_continue(&mut self) -> bool {
        self()
    }
}
