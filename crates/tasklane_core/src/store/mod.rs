//! Per-user task storage.
//!
//! # Responsibility
//! - Own the ordered task collection and the monotonic ID counter for one
//!   user.
//! - Enforce write-path validation before any mutation.
//!
//! # Invariants
//! - IDs are unique, strictly increasing in creation order and never reused,
//!   even after deletion.
//! - Every mutation is a single step; the store is never observable in a
//!   half-mutated state.

pub mod task_store;
