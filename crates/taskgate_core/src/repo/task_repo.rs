//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide list/get/create/mark-done/delete over the task collection.
//! - Allocate strictly increasing identifiers.
//!
//! # Invariants
//! - All operations run under one mutex; readers never observe a partial write.
//! - Ids are never reused within a process, even after the highest id is
//!   deleted.
//! - `list_tasks` returns records in insertion order.

use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(TaskValidationError),
    NotFound(TaskId),
    /// Seed records carry id `0` or repeat an id.
    InvalidSeed(TaskId),
    /// The id space is used up; no further records can be created.
    IdExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidSeed(id) => write!(f, "invalid seed task id: {id}"),
            Self::IdExhausted => write!(f, "task id space exhausted"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::InvalidSeed(_) | Self::IdExhausted => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository: Send + Sync {
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn create_task(&self, payload: &NewTask) -> RepoResult<Task>;
    fn mark_done(&self, id: TaskId) -> RepoResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepoResult<TaskId>;
}

#[derive(Debug, Default)]
struct RegistryState {
    tasks: Vec<Task>,
    // High-water mark of every id ever assigned or seeded.
    last_id: TaskId,
}

impl RegistryState {
    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// Mutex-guarded in-memory task registry.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    state: Mutex<RegistryState>,
}

impl InMemoryTaskRepository {
    /// Creates an empty registry; the first assigned id is `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with `seed`, kept in the given order.
    ///
    /// New ids continue after the largest seeded id.
    ///
    /// # Errors
    /// - `InvalidSeed(id)` when a record has id `0` or shares its id with an
    ///   earlier record.
    pub fn with_seed(seed: Vec<Task>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(seed.len());
        if let Some(bad) = seed.iter().find(|task| task.id == 0 || !seen.insert(task.id)) {
            return Err(RepoError::InvalidSeed(bad.id));
        }
        Ok(Self::from_seed_unchecked(seed))
    }

    /// Creates a registry holding the default fixture records.
    pub fn seeded() -> Self {
        // Why: fixture ids are constant and unique (pinned by a test), so the
        // checked constructor would only add an unreachable error path.
        Self::from_seed_unchecked(crate::model::task::seed_tasks())
    }

    fn from_seed_unchecked(seed: Vec<Task>) -> Self {
        let last_id = seed.iter().map(|task| task.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(RegistryState {
                tasks: seed,
                last_id,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Every mutation below is a single Vec operation, so a poisoned guard
        // still holds a consistent collection.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.lock().tasks.clone())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let state = self.lock();
        Ok(state.tasks.iter().find(|task| task.id == id).cloned())
    }

    fn create_task(&self, payload: &NewTask) -> RepoResult<Task> {
        let validated = payload.validate()?;

        let mut state = self.lock();
        let id = state.last_id.checked_add(1).ok_or(RepoError::IdExhausted)?;
        state.last_id = id;
        let task = validated.into_task(id);
        state.tasks.push(task.clone());
        Ok(task)
    }

    fn mark_done(&self, id: TaskId) -> RepoResult<Task> {
        let mut state = self.lock();
        let index = state.position(id).ok_or(RepoError::NotFound(id))?;
        let stored = &mut state.tasks[index];
        stored.done = true;
        Ok(stored.clone())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<TaskId> {
        let mut state = self.lock();
        let index = state.position(id).ok_or(RepoError::NotFound(id))?;
        state.tasks.remove(index);
        Ok(id)
    }
}
