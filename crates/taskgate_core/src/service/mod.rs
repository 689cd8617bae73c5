//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and the optional create gate.
//! - Keep transport layers decoupled from storage and locking details.

pub mod task_service;
