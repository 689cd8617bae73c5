//! Domain model for registry records.
//!
//! # Responsibility
//! - Define the canonical task record and its caller payload shape.
//! - Validate caller input before it reaches the registry.
//!
//! # Invariants
//! - Every stored record is identified by a registry-assigned `TaskId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod task;
