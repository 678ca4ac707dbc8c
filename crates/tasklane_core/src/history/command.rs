//! Self-contained reversible mutation commands.
//!
//! # Responsibility
//! - Carry forward and inverse payloads for one applied mutation.
//! - Replay either direction against a `TaskStore` in O(1) steps.
//!
//! # Invariants
//! - Payloads are snapshots, never live references; `Add` keeps the full
//!   created task so a redo reinserts it at the originally assigned ID.

use crate::model::task::Task;
use crate::store::task_store::{StoreResult, TaskStore};

/// One applied, reversible mutation.
///
/// The engine applies the initial forward effect directly against the store
/// and records the resulting command; `apply` here is the redo path and
/// `invert` the undo path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A task was created. The snapshot pins the assigned ID and the fields
    /// at creation time.
    Add { task: Task },
    /// A task was removed. The snapshot is everything needed to put it back
    /// at its original ID and list position.
    Remove { task: Task },
    /// A task was rewritten in place.
    Update { before: Task, after: Task },
}

impl Command {
    /// Replays the forward effect (redo).
    ///
    /// # Errors
    /// Store errors only occur when the command is replayed against a store
    /// it does not describe; the history layer treats that as corruption.
    pub fn apply(&self, store: &mut TaskStore) -> StoreResult<()> {
        match self {
            Self::Add { task } => store.restore(task.clone()),
            Self::Remove { task } => store.remove(task.id).map(|_| ()),
            Self::Update { after, .. } => store.replace(after.clone()).map(|_| ()),
        }
    }

    /// Replays the inverse effect (undo).
    pub fn invert(&self, store: &mut TaskStore) -> StoreResult<()> {
        match self {
            Self::Add { task } => store.remove(task.id).map(|_| ()),
            Self::Remove { task } => store.restore(task.clone()),
            Self::Update { before, .. } => store.replace(before.clone()).map(|_| ()),
        }
    }
}
