//! Registry storage contracts and implementations.
//!
//! # Responsibility
//! - Define the CRUD contract the service layer depends on.
//! - Keep locking and identifier allocation inside the storage boundary.
//!
//! # Invariants
//! - Writes validate caller payloads before mutating state.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`).

pub mod task_repo;
