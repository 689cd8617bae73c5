//! Time-gated rate limiter.
//!
//! # Responsibility
//! - Permit a guarded action at most once per fixed interval.
//! - Read time exclusively through an injected `TimeSource`.
//!
//! # Invariants
//! - Between two successful permits at least one full interval has elapsed
//!   as measured by the injected clock.
//! - A rejected call never moves `last_execution`.
//! - The elapsed check and the `last_execution` update share one critical
//!   section, so concurrent callers cannot both pass within one window.

use crate::sync::clock::TimeSource;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Interval used by `RateLimiter::new`.
pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(60);

/// Returned when the gate is still cooling down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitedError {
    /// Remaining time until the gate reopens.
    pub retry_after: Duration,
}

impl Display for RateLimitedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "too early, try again in {}ms",
            self.retry_after.as_millis()
        )
    }
}

impl Error for RateLimitedError {}

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Interval elapsed; the next call is permitted.
    Ready,
    /// Interval not yet elapsed; the next call is rejected.
    Cooling,
}

/// Permits an action at most once per `interval`.
pub struct RateLimiter<C: TimeSource> {
    clock: C,
    interval: Duration,
    // `None` only when the clock cannot represent `now - interval`; treated
    // as "interval already elapsed".
    last_execution: Mutex<Option<Instant>>,
}

impl<C: TimeSource> RateLimiter<C> {
    /// Creates a limiter with the default 60 second interval.
    pub fn new(clock: C) -> Self {
        Self::with_interval(clock, DEFAULT_RATE_LIMIT_INTERVAL)
    }

    /// Creates a limiter with a custom interval.
    ///
    /// `last_execution` starts one interval in the past, so the first call
    /// always succeeds.
    pub fn with_interval(clock: C, interval: Duration) -> Self {
        let last_execution = clock.now().checked_sub(interval);
        Self {
            clock,
            interval,
            last_execution: Mutex::new(last_execution),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks the gate and, when open, records this call as the last execution.
    ///
    /// The clock is read once for the check and once more for the update.
    ///
    /// # Errors
    /// - `RateLimitedError` when less than one interval has elapsed since the
    ///   last successful call.
    pub fn can_execute(&self) -> Result<(), RateLimitedError> {
        let mut last_execution = self
            .last_execution
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        if let Some(remaining) = self.remaining(*last_execution, now) {
            return Err(RateLimitedError {
                retry_after: remaining,
            });
        }

        // Why: the window restarts at the moment the permit is granted, not
        // at the check; both reads happen under the same guard.
        *last_execution = Some(self.clock.now());
        Ok(())
    }

    /// Reports whether the next `can_execute` would pass, without mutating.
    pub fn state(&self) -> GateState {
        let last_execution = self
            .last_execution
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match self.remaining(*last_execution, self.clock.now()) {
            Some(_) => GateState::Cooling,
            None => GateState::Ready,
        }
    }

    fn remaining(&self, last_execution: Option<Instant>, now: Instant) -> Option<Duration> {
        let last = last_execution?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            Some(self.interval - elapsed)
        } else {
            None
        }
    }
}
