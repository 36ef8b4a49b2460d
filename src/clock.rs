//! Monotonic time sources
use std::time::Instant;

/// A source of monotonic timestamps
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

/// The system's monotonic clock
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) use self::manual::ManualClock;
