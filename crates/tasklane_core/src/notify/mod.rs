//! Derived task notifications.
//!
//! # Responsibility
//! - Project alerts from current task state against a fixed rule set.
//!
//! # Invariants
//! - Projection is a pure function of `(store contents, today, config)`:
//!   no stored notification state, no mutation, byte-identical output for
//!   unchanged inputs.

pub mod rules;
