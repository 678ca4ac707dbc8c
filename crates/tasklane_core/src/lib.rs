//! Core engine for per-user task tracking with reversible mutation.
//! This crate is the single source of truth for business invariants; the
//! HTTP shim that exposes it as JSON endpoints lives outside this crate.

pub mod history;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use history::command::Command;
pub use history::undo_redo::{History, HistoryConfig, HistoryError, HistoryKind};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    far_future_due, Task, TaskAttrs, TaskDraft, TaskId, TaskStatus, ValidationError, MIN_PRIORITY,
};
pub use notify::rules::{Notification, NotificationConfig, NotificationKind};
pub use service::engine::{EngineError, EngineResult, TaskEngine};
pub use store::task_store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
