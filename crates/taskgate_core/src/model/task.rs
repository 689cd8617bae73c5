//! Task domain model.
//!
//! # Responsibility
//! - Define the record stored by the registry and its JSON shape.
//! - Validate caller payloads (`NewTask`) into insertable values.
//!
//! # Invariants
//! - `id` is assigned by the registry and never changes after creation.
//! - `name` is non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry-assigned identifier. `0` is never assigned.
pub type TaskId = u64;

/// One record held by the registry.
///
/// Serialized as `{"id": int, "name": string, "done": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub done: bool,
}

impl Task {
    pub fn new(id: TaskId, name: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            name: name.into(),
            done,
        }
    }
}

/// Caller-supplied payload for task creation.
///
/// Fields are optional at the decode layer so that a missing `name` surfaces
/// as a validation error instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl NewTask {
    /// Builds a payload with both fields present.
    pub fn named(name: impl Into<String>, done: bool) -> Self {
        Self {
            name: Some(name.into()),
            done: Some(done),
        }
    }

    /// Checks required fields and applies defaults.
    ///
    /// # Errors
    /// - `MissingField("name")` when `name` is absent.
    /// - `EmptyName` when `name` is blank after trimming.
    pub fn validate(&self) -> Result<ValidatedTask, TaskValidationError> {
        let name = self
            .name
            .as_deref()
            .ok_or(TaskValidationError::MissingField("name"))?;
        if name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }

        Ok(ValidatedTask {
            name: name.to_string(),
            done: self.done.unwrap_or(false),
        })
    }
}

/// Payload that passed validation; only the registry can turn it into a `Task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    pub name: String,
    pub done: bool,
}

impl ValidatedTask {
    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task::new(id, self.name, self.done)
    }
}

/// Validation errors for caller-supplied task payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    MissingField(&'static str),
    EmptyName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::EmptyName => write!(f, "task name cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Fixture records the registry starts with in its default configuration.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "GIT", true),
        Task::new(2, "Computer Networks", true),
        Task::new(3, "Databases fundamentals", true),
        Task::new(4, "Go databases", true),
        Task::new(5, "Go testing", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_tasks, NewTask, Task, TaskValidationError};

    #[test]
    fn validate_defaults_done_to_false() {
        let payload = NewTask {
            name: Some("write docs".to_string()),
            done: None,
        };
        let validated = payload.validate().expect("payload should validate");
        assert_eq!(validated.name, "write docs");
        assert!(!validated.done);
    }

    #[test]
    fn validate_rejects_missing_and_blank_name() {
        let missing = NewTask::default().validate().expect_err("name is required");
        assert_eq!(missing, TaskValidationError::MissingField("name"));

        let blank = NewTask::named("   ", false)
            .validate()
            .expect_err("blank name must be rejected");
        assert_eq!(blank, TaskValidationError::EmptyName);
    }

    #[test]
    fn task_json_shape_matches_wire_contract() {
        let task = Task::new(6, "X", false);
        let value = serde_json::to_value(&task).expect("task should serialize");
        assert_eq!(value, serde_json::json!({"id": 6, "name": "X", "done": false}));
    }

    #[test]
    fn payload_decodes_without_done_field() {
        let payload: NewTask =
            serde_json::from_str(r#"{"name":"X"}"#).expect("payload should decode");
        assert_eq!(payload.name.as_deref(), Some("X"));
        assert_eq!(payload.done, None);
    }

    #[test]
    fn seed_ids_are_strictly_increasing() {
        let seeds = seed_tasks();
        assert_eq!(seeds.len(), 5);
        assert!(seeds.windows(2).all(|pair| pair[0].id < pair[1].id));
        assert_eq!(seeds.iter().filter(|task| !task.done).count(), 1);
    }
}
