//! Synchronization primitives shared by the registry and its callers.
//!
//! # Responsibility
//! - Provide a lost-update-free counter.
//! - Provide an injectable time source and a time-gated rate limiter.
//!
//! # Invariants
//! - Every check-and-update runs inside one critical section.

pub mod clock;
pub mod counter;
pub mod rate_limiter;
