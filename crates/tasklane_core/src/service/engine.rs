//! Multi-tenant task engine facade.
//!
//! # Responsibility
//! - Resolve usernames to their owned store + history pair, creating both
//!   lazily and atomically on first write.
//! - Route the external call contract (add/remove/update/list/undo/redo/
//!   notifications plus search and filter) through store and history.
//!
//! # Invariants
//! - Per-user mutual exclusion: mutations for one username are serialized
//!   by that user's own lock; unrelated usernames share no lock.
//! - Every operation validates fully before mutating, then mutates via a
//!   single reversible step; partial states are never observable.

use crate::history::command::Command;
use crate::history::undo_redo::{History, HistoryConfig, HistoryError, HistoryKind};
use crate::model::task::{Task, TaskDraft, TaskId, TaskStatus, ValidationError};
use crate::notify::rules::{project, Notification, NotificationConfig};
use crate::store::task_store::{StoreError, TaskStore};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

pub type EngineResult<T> = Result<T, EngineError>;

/// Structured failure for every facade operation.
///
/// `kind()` exposes a stable machine-readable discriminator so an external
/// shim can map failures to transport responses without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Validation(ValidationError),
    NotFound(TaskId),
    EmptyHistory(HistoryKind),
    /// Invariant breach inside the engine itself. Not part of the normal
    /// contract; surfaced instead of panicking.
    Internal(String),
}

impl EngineError {
    /// Stable error-kind discriminator for the external shim.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::EmptyHistory(_) => "empty_history",
            Self::Internal(_) => "internal",
        }
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::EmptyHistory(kind) => write!(f, "nothing to {kind}"),
            Self::Internal(message) => write!(f, "internal engine error: {message}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::DuplicateId(id) => {
                Self::Internal(format!("duplicate task id {id} during replay"))
            }
        }
    }
}

impl From<HistoryError> for EngineError {
    fn from(value: HistoryError) -> Self {
        match value {
            HistoryError::Empty(kind) => Self::EmptyHistory(kind),
            // A replay mismatch means history and store diverged, which the
            // locking discipline is supposed to rule out.
            HistoryError::Store(err) => {
                Self::Internal(format!("history replay diverged from store: {err}"))
            }
        }
    }
}

/// One user's owned store + history pair.
#[derive(Debug)]
struct UserState {
    store: TaskStore,
    history: History,
}

/// Single entry point for the external shim.
///
/// The partition map is guarded by an outer `RwLock`; each user's state sits
/// behind its own `Mutex`, so concurrent requests for different usernames
/// proceed without shared lock contention while same-user mutations are
/// serialized.
pub struct TaskEngine {
    users: RwLock<HashMap<String, Arc<Mutex<UserState>>>>,
    notify_config: NotificationConfig,
    history_config: HistoryConfig,
}

impl Default for TaskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskEngine {
    pub fn new() -> Self {
        Self::with_config(NotificationConfig::default(), HistoryConfig::default())
    }

    pub fn with_config(notify_config: NotificationConfig, history_config: HistoryConfig) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            notify_config,
            history_config,
        }
    }

    /// Creates a task for `username` and returns the assigned ID.
    ///
    /// # Errors
    /// - `EngineError::Validation` for a blank username, blank title, zero
    ///   priority, malformed due date or unknown status name.
    pub fn add_task(&self, username: &str, draft: TaskDraft) -> EngineResult<TaskId> {
        let username = require_username(username)?;
        let attrs = draft.resolve()?;

        let state = self.write_state(username);
        let mut state = lock_user(&state);

        let id = state.store.add(attrs)?;
        let task = state.store.get(id)?.clone();
        state.history.record(Command::Add { task });

        info!("event=task_added module=engine status=ok user={username} task_id={id}");
        Ok(id)
    }

    /// Removes a task by ID.
    ///
    /// A miss produces `EngineError::NotFound` and records no history entry;
    /// only successful mutations are undoable.
    pub fn remove_task(&self, username: &str, id: TaskId) -> EngineResult<()> {
        let username = require_username(username)?;

        let state = self.write_state(username);
        let mut state = lock_user(&state);

        let task = state.store.remove(id).map_err(|err| {
            warn!("event=task_removed module=engine status=error user={username} task_id={id}");
            EngineError::from(err)
        })?;
        state.history.record(Command::Remove { task });

        info!("event=task_removed module=engine status=ok user={username} task_id={id}");
        Ok(())
    }

    /// Rewrites every field of an existing task from a fresh draft.
    ///
    /// Records an `Update` command carrying both the previous and the new
    /// snapshot, so undo restores the exact prior field values.
    pub fn update_task(&self, username: &str, id: TaskId, draft: TaskDraft) -> EngineResult<()> {
        let username = require_username(username)?;
        let attrs = draft.resolve()?;

        let state = self.write_state(username);
        let mut state = lock_user(&state);

        let before = state.store.get(id)?.clone();
        let after = Task::from_attrs(id, attrs);
        state.store.replace(after.clone())?;
        state.history.record(Command::Update { before, after });

        info!("event=task_updated module=engine status=ok user={username} task_id={id}");
        Ok(())
    }

    /// Reverses the most recent mutation for `username`.
    ///
    /// # Errors
    /// - `EngineError::EmptyHistory(Undo)` when nothing is undoable, which
    ///   includes a username that never performed an operation.
    pub fn undo(&self, username: &str) -> EngineResult<()> {
        let username = require_username(username)?;

        let state = self.write_state(username);
        let mut state = lock_user(&state);

        let UserState { store, history } = &mut *state;
        history.undo(store).map_err(|err| {
            debug!("event=undo_applied module=engine status=error user={username}");
            EngineError::from(err)
        })?;

        info!("event=undo_applied module=engine status=ok user={username}");
        Ok(())
    }

    /// Re-applies the most recently undone mutation for `username`.
    pub fn redo(&self, username: &str) -> EngineResult<()> {
        let username = require_username(username)?;

        let state = self.write_state(username);
        let mut state = lock_user(&state);

        let UserState { store, history } = &mut *state;
        history.redo(store).map_err(|err| {
            debug!("event=redo_applied module=engine status=error user={username}");
            EngineError::from(err)
        })?;

        info!("event=redo_applied module=engine status=ok user={username}");
        Ok(())
    }

    /// Lists `username`'s tasks in creation order.
    ///
    /// Unknown or blank usernames yield an empty list; reads never create
    /// per-user state.
    pub fn list_tasks(&self, username: &str) -> Vec<Task> {
        match self.read_state(username) {
            Some(state) => lock_user(&state).store.list(),
            None => Vec::new(),
        }
    }

    /// `list_tasks` serialized as the external JSON array contract.
    pub fn list_tasks_json(&self, username: &str) -> EngineResult<String> {
        to_json(&self.list_tasks(username))
    }

    /// Notifications projected against the local calendar date.
    pub fn notifications(&self, username: &str) -> Vec<Notification> {
        self.notifications_on(username, chrono::Local::now().date_naive())
    }

    /// Notifications projected against an explicit `today`.
    ///
    /// Pure read: identical inputs yield identical output, and no per-user
    /// state is created or mutated.
    pub fn notifications_on(&self, username: &str, today: chrono::NaiveDate) -> Vec<Notification> {
        match self.read_state(username) {
            Some(state) => project(&lock_user(&state).store, today, &self.notify_config),
            None => Vec::new(),
        }
    }

    /// `notifications` serialized as the external JSON array contract.
    pub fn notifications_json(&self, username: &str) -> EngineResult<String> {
        to_json(&self.notifications(username))
    }

    /// Case-insensitive substring search over task titles.
    pub fn search_tasks(&self, username: &str, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        self.list_tasks(username)
            .into_iter()
            .filter(|task| task.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Conjunctive filter on status and/or priority.
    pub fn filter_tasks(
        &self,
        username: &str,
        status: Option<TaskStatus>,
        priority: Option<u32>,
    ) -> Vec<Task> {
        self.list_tasks(username)
            .into_iter()
            .filter(|task| status.is_none_or(|wanted| task.status == wanted))
            .filter(|task| priority.is_none_or(|wanted| task.priority == wanted))
            .collect()
    }

    /// Sorted list of usernames that own a partition. Diagnostics only.
    pub fn usernames(&self) -> Vec<String> {
        let users = read_map(&self.users);
        let mut names: Vec<String> = users.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolves the partition for a write, creating it on first reference.
    ///
    /// The map write lock covers only the entry lookup/insertion, never the
    /// per-user operation itself.
    fn write_state(&self, username: &str) -> Arc<Mutex<UserState>> {
        if let Some(state) = self.read_state(username) {
            return state;
        }

        let mut users = write_map(&self.users);
        Arc::clone(users.entry(username.to_string()).or_insert_with(|| {
            debug!("event=user_partition_created module=engine status=ok user={username}");
            Arc::new(Mutex::new(UserState {
                store: TaskStore::new(),
                history: History::new(self.history_config),
            }))
        }))
    }

    /// Resolves an existing partition without creating one.
    fn read_state(&self, username: &str) -> Option<Arc<Mutex<UserState>>> {
        read_map(&self.users).get(username.trim()).map(Arc::clone)
    }
}

fn require_username(username: &str) -> Result<&str, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    Ok(trimmed)
}

fn to_json<T: serde::Serialize>(value: &T) -> EngineResult<String> {
    serde_json::to_string(value)
        .map_err(|err| EngineError::Internal(format!("JSON serialization failed: {err}")))
}

// Lock poisoning is not propagated to callers: every mutation under a lock
// is a single step, so the inner value stays consistent even when a holder
// panicked mid-request.
fn lock_user(state: &Arc<Mutex<UserState>>) -> MutexGuard<'_, UserState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_map<'a>(
    users: &'a RwLock<HashMap<String, Arc<Mutex<UserState>>>>,
) -> std::sync::RwLockReadGuard<'a, HashMap<String, Arc<Mutex<UserState>>>> {
    users.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_map<'a>(
    users: &'a RwLock<HashMap<String, Arc<Mutex<UserState>>>>,
) -> std::sync::RwLockWriteGuard<'a, HashMap<String, Arc<Mutex<UserState>>>> {
    users.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
