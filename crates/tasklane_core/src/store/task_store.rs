//! Ordered in-memory task store with a monotonic ID counter.
//!
//! # Responsibility
//! - Provide the CRUD surface the history layer replays commands against.
//! - Keep listing order equal to creation order.
//!
//! # Invariants
//! - `next_id` only ever grows; removing a task never frees its ID.
//! - `restore` puts a task back at its original ID, which also restores its
//!   position in listing order (IDs are the ordering key).

use crate::model::task::{Task, TaskAttrs, TaskId, ValidationError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(TaskId),
    /// A restore targeted an ID that is still occupied. Only reachable when
    /// a command is replayed against a store it does not describe.
    DuplicateId(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::DuplicateId(id) => write!(f, "task id already present: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One user's ordered task collection plus the ID-assignment counter.
///
/// A `BTreeMap` keyed by the strictly increasing ID keeps iteration in
/// creation order without a separate ordering structure.
#[derive(Debug)]
pub struct TaskStore {
    tasks: BTreeMap<TaskId, Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Inserts a new task from validated attributes and returns its ID.
    ///
    /// # Contract
    /// - Runs `TaskAttrs::validate()` before touching any state.
    /// - Assigns `next_id` and increments it; the counter survives later
    ///   deletions.
    ///
    /// # Errors
    /// - `StoreError::Validation` for an empty title or zero priority.
    pub fn add(&mut self, attrs: TaskAttrs) -> StoreResult<TaskId> {
        attrs.validate()?;

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.insert(id, Task::from_attrs(id, attrs));
        Ok(id)
    }

    /// Removes a task and returns the full removed record.
    ///
    /// `next_id` is unaffected; the removed ID is never reassigned.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when the ID is absent.
    pub fn remove(&mut self, id: TaskId) -> StoreResult<Task> {
        self.tasks.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Reinserts a previously removed task at its original ID.
    ///
    /// Used by the undo path for `Remove` commands; because IDs double as
    /// the ordering key the task reappears at its original list position.
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` when the ID is already occupied.
    pub fn restore(&mut self, task: Task) -> StoreResult<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        self.tasks.insert(task.id, task);
        Ok(())
    }

    /// Swaps in a full task record by ID, returning the previous value.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the replacement fails write checks.
    /// - `StoreError::NotFound` when the ID is absent.
    pub fn replace(&mut self, task: Task) -> StoreResult<Task> {
        let attrs = TaskAttrs {
            title: task.title.clone(),
            due: task.due,
            priority: task.priority,
            status: task.status,
        };
        attrs.validate()?;

        match self.tasks.get_mut(&task.id) {
            Some(slot) => Ok(std::mem::replace(slot, task)),
            None => Err(StoreError::NotFound(task.id)),
        }
    }

    /// Looks up one task by ID.
    pub fn get(&self, id: TaskId) -> StoreResult<&Task> {
        self.tasks.get(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Snapshot of all tasks in creation order.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    /// Iterator over tasks in creation order, for read-only projections.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
