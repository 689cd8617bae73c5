//! Time sources for clock-driven components.
//!
//! # Responsibility
//! - Abstract "now" so gates can be driven deterministically in tests.
//!
//! # Invariants
//! - `ManualClock` never moves unless told to; it never goes backwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Provider of the current monotonic time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for deterministic tests and scripted demos.
///
/// Time is `origin + offset`; `offset` only grows via `advance` or
/// `set_offset`. Every `now()` call is counted.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
    reads: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            reads: AtomicU64::new(0),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += step;
    }

    /// Sets the elapsed time since construction. Earlier values are ignored.
    pub fn set_offset(&self, elapsed: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        if elapsed > *offset {
            *offset = elapsed;
        }
    }

    /// Elapsed time since construction as seen by this clock.
    pub fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of `now()` calls observed so far.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.origin + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualClock, TimeSource};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn manual_clock_only_moves_forward() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance(Duration::from_secs(30));
        assert_eq!(clock.now() - start, Duration::from_secs(30));

        clock.set_offset(Duration::from_secs(10));
        assert_eq!(clock.offset(), Duration::from_secs(30));

        clock.set_offset(Duration::from_secs(61));
        assert_eq!(clock.now() - start, Duration::from_secs(61));
    }

    #[test]
    fn manual_clock_counts_reads_through_shared_handle() {
        let clock = Arc::new(ManualClock::new());
        let shared: Arc<ManualClock> = Arc::clone(&clock);
        let _ = shared.now();
        let _ = shared.now();
        assert_eq!(clock.reads(), 2);
    }
}
