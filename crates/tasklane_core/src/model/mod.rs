//! Domain model for per-user task tracking.
//!
//! # Responsibility
//! - Define the canonical task record and its typed fields.
//! - Perform all boundary coercion (string date, string status) exactly once.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` that is never reused.
//! - Core mutation logic only ever sees fully typed, validated fields.

pub mod task;
