//! Core domain logic for taskgate.
//! This crate owns the registry, its identifier policy, and the time gate.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{seed_tasks, NewTask, Task, TaskId, TaskValidationError};
pub use repo::task_repo::{InMemoryTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::task_service::{ServiceError, ServiceResult, TaskService};
pub use sync::clock::{ManualClock, SystemClock, TimeSource};
pub use sync::counter::SafeCounter;
pub use sync::rate_limiter::{
    GateState, RateLimitedError, RateLimiter, DEFAULT_RATE_LIMIT_INTERVAL,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
