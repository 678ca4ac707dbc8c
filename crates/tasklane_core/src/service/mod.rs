//! Engine facade.
//!
//! # Responsibility
//! - Expose the narrow call contract the external shim consumes.
//! - Keep per-user state partitioned and serialized.
//!
//! # Invariants
//! - Operations for one username never touch another username's state.
//! - Reads never create per-user state; writes create it lazily.

pub mod engine;
