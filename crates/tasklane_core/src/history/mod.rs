//! Reversible mutation history.
//!
//! # Responsibility
//! - Model every successful mutation as a self-contained `Command` value.
//! - Track per-user undo/redo stacks over those commands.
//!
//! # Invariants
//! - A recorded command closes over the snapshots it needs; it reverses its
//!   exact state change independent of later mutations.
//! - Recording a new command is the only transition that clears the redo
//!   stack.

pub mod command;
pub mod undo_redo;
