//! Mutex-guarded counter.

use std::sync::{Mutex, PoisonError};

/// Counter safe under arbitrary concurrent callers.
///
/// `value()` observes every increment that returned before it was called.
#[derive(Debug, Default)]
pub struct SafeCounter {
    count: Mutex<u64>,
}

impl SafeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increases the count by one.
    pub fn increment(&self) {
        self.add(1);
    }

    /// Increases the count by `n` in one step.
    pub fn add(&self, n: u64) {
        // Poisoning cannot leave the integer half-written, so recover the guard.
        let mut guard = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += n;
    }

    /// Returns the current count.
    pub fn value(&self) -> u64 {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
