//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for adapters.
//! - Consult the create gate (when configured) before allocating an id.
//! - Count accepted mutations.
//!
//! # Invariants
//! - A create rejected by the gate never reaches the repository.
//! - Service APIs never bypass repository validation.

use crate::config::CoreConfig;
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::sync::clock::{SystemClock, TimeSource};
use crate::sync::counter::SafeCounter;
use crate::sync::rate_limiter::{RateLimitedError, RateLimiter};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Caller payload is malformed or incomplete.
    Validation(TaskValidationError),
    /// Referenced task does not exist.
    NotFound(TaskId),
    /// Create gate is still cooling down.
    RateLimited(RateLimitedError),
    /// No further ids can be allocated.
    IdExhausted,
    /// Any other repository failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Machine-readable reason string for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::RateLimited(_) => "rate_limited",
            Self::IdExhausted => "id_exhausted",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::RateLimited(err) => write!(f, "{err}"),
            Self::IdExhausted => write!(f, "task id space exhausted"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::RateLimited(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::IdExhausted => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::IdExhausted => Self::IdExhausted,
            other => Self::Repo(other),
        }
    }
}

impl From<RateLimitedError> for ServiceError {
    fn from(value: RateLimitedError) -> Self {
        Self::RateLimited(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case service wrapping a task repository.
pub struct TaskService<R: TaskRepository, C: TimeSource = SystemClock> {
    repo: R,
    create_gate: Option<RateLimiter<C>>,
    mutations: SafeCounter,
}

impl<R: TaskRepository> TaskService<R, SystemClock> {
    /// Creates an ungated service.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            create_gate: None,
            mutations: SafeCounter::new(),
        }
    }
}

impl<R: TaskRepository, C: TimeSource> TaskService<R, C> {
    /// Creates a service whose `create` calls must pass `gate` first.
    pub fn with_create_gate(repo: R, gate: RateLimiter<C>) -> Self {
        Self {
            repo,
            create_gate: Some(gate),
            mutations: SafeCounter::new(),
        }
    }

    /// Creates a service from configuration, reading time from `clock`.
    ///
    /// The gate is installed only when `config.create_interval` is set.
    pub fn from_config(repo: R, clock: C, config: &CoreConfig) -> Self {
        Self {
            repo,
            create_gate: config
                .create_interval
                .map(|interval| RateLimiter::with_interval(clock, interval)),
            mutations: SafeCounter::new(),
        }
    }

    /// Returns the create gate, if one is configured.
    pub fn create_gate(&self) -> Option<&RateLimiter<C>> {
        self.create_gate.as_ref()
    }

    /// Lists all tasks in insertion order.
    pub fn list(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks()?)
    }

    /// Gets one task by id.
    ///
    /// # Errors
    /// - `NotFound` when no task has this id.
    pub fn get(&self, id: TaskId) -> ServiceResult<Task> {
        self.repo.get_task(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Creates a task after consulting the create gate.
    ///
    /// # Contract
    /// - Payload is validated before the gate is consulted, so a malformed
    ///   request does not consume the caller's permit.
    /// - Returns the stored record with its assigned id.
    pub fn create(&self, payload: &NewTask) -> ServiceResult<Task> {
        payload.validate().map_err(ServiceError::Validation)?;
        if let Some(gate) = &self.create_gate {
            gate.can_execute()?;
        }

        let task = self.repo.create_task(payload)?;
        self.mutations.increment();
        Ok(task)
    }

    /// Marks a task as done and returns the updated record.
    pub fn mark_done(&self, id: TaskId) -> ServiceResult<Task> {
        let task = self.repo.mark_done(id)?;
        self.mutations.increment();
        Ok(task)
    }

    /// Deletes a task and returns its id.
    pub fn delete(&self, id: TaskId) -> ServiceResult<TaskId> {
        let deleted = self.repo.delete_task(id)?;
        self.mutations.increment();
        Ok(deleted)
    }

    /// Number of successful create/mark-done/delete calls.
    pub fn mutation_count(&self) -> u64 {
        self.mutations.value()
    }
}
