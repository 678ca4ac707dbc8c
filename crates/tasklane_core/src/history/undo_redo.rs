//! Per-user undo/redo stacks.
//!
//! # Responsibility
//! - Record applied commands and replay them in either direction.
//! - Optionally bound history depth without corrupting the stacks.
//!
//! # Invariants
//! - Recording a new command clears the redo stack; nothing else does.
//! - Depth eviction only removes from the bottom of the undo stack.
//! - A failed replay leaves both stacks and the store untouched.

use crate::history::command::Command;
use crate::store::task_store::{StoreError, TaskStore};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Which stack an empty-history failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl Display for HistoryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Error for undo/redo requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    Empty(HistoryKind),
    /// A command no longer matched the store it was replayed against.
    Store(StoreError),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(kind) => write!(f, "nothing to {kind}"),
            Self::Store(err) => write!(f, "history replay failed: {err}"),
        }
    }
}

impl Error for HistoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Empty(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for HistoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Depth policy for one user's history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryConfig {
    /// Maximum number of undoable commands; `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    pub fn bounded(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// One user's undo and redo stacks.
///
/// The undo side is a `VecDeque` so a bounded configuration can evict the
/// oldest entry from the bottom while pushes and pops stay at the back.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    config: HistoryConfig,
}

impl History {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Records a freshly applied command.
    ///
    /// # Contract
    /// - Clears the redo stack: redo history is only valid for an unbroken
    ///   chain of undos with no intervening new mutation.
    /// - When the configured depth is reached, evicts the oldest entry from
    ///   the bottom of the undo stack before pushing.
    pub fn record(&mut self, command: Command) {
        if let Some(max_depth) = self.config.max_depth {
            while self.undo_stack.len() >= max_depth.max(1) {
                self.undo_stack.pop_front();
            }
        }
        self.undo_stack.push_back(command);
        self.redo_stack.clear();
    }

    /// Reverses the most recent command against `store`.
    ///
    /// # Errors
    /// - `HistoryError::Empty(Undo)` when there is nothing to undo.
    /// - `HistoryError::Store` when the command no longer matches the store;
    ///   the command is pushed back so the stacks stay consistent.
    pub fn undo(&mut self, store: &mut TaskStore) -> HistoryResult<()> {
        let command = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::Empty(HistoryKind::Undo))?;

        if let Err(err) = command.invert(store) {
            self.undo_stack.push_back(command);
            return Err(err.into());
        }

        self.redo_stack.push(command);
        Ok(())
    }

    /// Re-applies the most recently undone command against `store`.
    ///
    /// # Errors
    /// - `HistoryError::Empty(Redo)` when there is nothing to redo.
    /// - `HistoryError::Store` on a replay mismatch, with the command pushed
    ///   back onto the redo stack.
    pub fn redo(&mut self, store: &mut TaskStore) -> HistoryResult<()> {
        let command = self
            .redo_stack
            .pop()
            .ok_or(HistoryError::Empty(HistoryKind::Redo))?;

        if let Err(err) = command.apply(store) {
            self.redo_stack.push(command);
            return Err(err.into());
        }

        self.undo_stack.push_back(command);
        Ok(())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
