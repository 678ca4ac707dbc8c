//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, history and
//!   notification projections.
//! - Turn loose boundary input (`TaskDraft`) into typed fields in one place.
//!
//! # Invariants
//! - `id` is stable, unique within one user's store and never reused.
//! - A `TaskAttrs` value has already passed date/status coercion; semantic
//!   validation (title, priority) happens in the store write path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task within one user's store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = u64;

/// Lowest accepted priority. Priorities grow upward without a fixed cap.
pub const MIN_PRIORITY: u32 = 1;

/// Sentinel due date for tasks created without one.
///
/// Far enough in the future that the overdue and due-soon rules can never
/// fire on it.
pub fn far_future_due() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).expect("sentinel date is a valid calendar date")
}

/// Task lifecycle state.
///
/// Serialized with the exact external names (`"Pending"`, `"InProgress"`,
/// `"Done"`); parsing at the boundary is more permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// Parses a boundary status string.
    ///
    /// Accepts the canonical names case-insensitively plus the snake_case
    /// spelling of `InProgress`. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "inprogress" | "in_progress" | "in-progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Canonical external name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for boundary input or store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyUsername,
    EmptyTitle,
    ZeroPriority,
    InvalidDueDate(String),
    UnknownStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::ZeroPriority => {
                write!(f, "task priority must be at least {MIN_PRIORITY}")
            }
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::UnknownStatus(value) => {
                write!(f, "unknown task status `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Canonical task record.
///
/// Field order matches the external JSON shape:
/// `{"id", "title", "due", "priority", "status"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned stable ID, strictly increasing in creation order.
    pub id: TaskId,
    /// Non-empty display title.
    pub title: String,
    /// Calendar due date; `far_future_due()` when the caller omitted one.
    pub due: NaiveDate,
    /// `1` (lowest) upward; no enforced upper bound.
    pub priority: u32,
    pub status: TaskStatus,
}

impl Task {
    /// Builds a task from a store-assigned ID and resolved attributes.
    pub fn from_attrs(id: TaskId, attrs: TaskAttrs) -> Self {
        Self {
            id,
            title: attrs.title,
            due: attrs.due,
            priority: attrs.priority,
            status: attrs.status,
        }
    }
}

/// Resolved, fully typed task attributes (everything but the ID).
///
/// Produced by [`TaskDraft::resolve`]; date and status strings have already
/// been coerced, so mutation paths never touch raw text again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAttrs {
    pub title: String,
    pub due: NaiveDate,
    pub priority: u32,
    pub status: TaskStatus,
}

impl TaskAttrs {
    /// Checks the semantic write invariants: non-blank title, priority >= 1.
    ///
    /// # Errors
    /// - `ValidationError::EmptyTitle` when the title is empty after trimming.
    /// - `ValidationError::ZeroPriority` when the priority is below the minimum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.priority < MIN_PRIORITY {
            return Err(ValidationError::ZeroPriority);
        }
        Ok(())
    }
}

/// Boundary input shape for creating or updating a task.
///
/// Mirrors the loose JSON payload of the external shim: the date and status
/// arrive as optional strings and are coerced exactly once in
/// [`TaskDraft::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    /// ISO `YYYY-MM-DD`; defaults to the far-future sentinel when absent.
    pub due: Option<String>,
    pub priority: u32,
    /// Status name; defaults to `Pending` when absent.
    pub status: Option<String>,
}

impl TaskDraft {
    /// Convenience constructor for the common title + priority case.
    pub fn new(title: impl Into<String>, priority: u32) -> Self {
        Self {
            title: title.into(),
            priority,
            ..Self::default()
        }
    }

    /// Coerces the draft into typed attributes.
    ///
    /// # Contract
    /// - Omitted `due` resolves to [`far_future_due`].
    /// - Omitted `status` resolves to `TaskStatus::Pending`.
    /// - The title is trimmed; semantic checks run in the store write path.
    ///
    /// # Errors
    /// - `ValidationError::InvalidDueDate` for a malformed date string.
    /// - `ValidationError::UnknownStatus` for an unrecognized status name.
    pub fn resolve(self) -> Result<TaskAttrs, ValidationError> {
        let due = match self.due.as_deref().map(str::trim) {
            None | Some("") => far_future_due(),
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidDueDate(text.to_string()))?,
        };

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => TaskStatus::Pending,
            Some(text) => TaskStatus::parse(text)
                .ok_or_else(|| ValidationError::UnknownStatus(text.to_string()))?,
        };

        Ok(TaskAttrs {
            title: self.title.trim().to_string(),
            due,
            priority: self.priority,
            status,
        })
    }
}
