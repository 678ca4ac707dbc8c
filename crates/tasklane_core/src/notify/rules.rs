//! Notification rule set and projection.
//!
//! # Responsibility
//! - Evaluate every task against the enumerated rules and emit ordered
//!   notification records.
//!
//! # Invariants
//! - Output order is deterministic: task ID ascending, then rule order
//!   (overdue, due-soon, stale-high-priority).
//! - The far-future sentinel due date never triggers a date-based rule.

use crate::model::task::{Task, TaskStatus};
use crate::store::task_store::TaskStore;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Which rule produced a notification.
///
/// Serialized with the external rule labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    #[serde(rename = "OVERDUE")]
    Overdue,
    #[serde(rename = "DUE_SOON")]
    DueSoon,
    #[serde(rename = "STALE_HIGH_PRIORITY")]
    StaleHighPriority,
}

impl NotificationKind {
    /// External label for this rule.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "OVERDUE",
            Self::DueSoon => "DUE_SOON",
            Self::StaleHighPriority => "STALE_HIGH_PRIORITY",
        }
    }
}

/// One derived alert. Never stored; recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub task_id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Tunable thresholds for the rule set.
#[derive(Debug, Clone, Copy)]
pub struct NotificationConfig {
    /// Days ahead (inclusive) for the due-soon rule.
    pub due_soon_horizon_days: u64,
    /// Minimum priority for the stale-high-priority rule.
    pub high_priority_threshold: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            // 48-hour horizon expressed in whole days.
            due_soon_horizon_days: 2,
            high_priority_threshold: 5,
        }
    }
}

/// Projects the current store contents into an ordered notification list.
///
/// # Contract
/// - Pure read: neither the store nor any history state is touched.
/// - Calling twice with unchanged inputs yields identical output.
pub fn project(store: &TaskStore, today: NaiveDate, config: &NotificationConfig) -> Vec<Notification> {
    let mut out = Vec::new();
    // Store iteration is already in ascending ID order.
    for task in store.iter() {
        evaluate_task(task, today, config, &mut out);
    }
    out
}

fn evaluate_task(
    task: &Task,
    today: NaiveDate,
    config: &NotificationConfig,
    out: &mut Vec<Notification>,
) {
    if task.status != TaskStatus::Done {
        if task.due < today {
            out.push(Notification {
                task_id: task.id,
                kind: NotificationKind::Overdue,
                message: format!("Task #{} `{}` was due {}", task.id, task.title, task.due),
            });
        } else if within_horizon(task.due, today, config.due_soon_horizon_days) {
            out.push(Notification {
                task_id: task.id,
                kind: NotificationKind::DueSoon,
                message: format!("Task #{} `{}` is due {}", task.id, task.title, task.due),
            });
        }
    }

    if task.status == TaskStatus::Pending && task.priority >= config.high_priority_threshold {
        out.push(Notification {
            task_id: task.id,
            kind: NotificationKind::StaleHighPriority,
            message: format!(
                "Task #{} `{}` is still pending at priority {}",
                task.id, task.title, task.priority
            ),
        });
    }
}

fn within_horizon(due: NaiveDate, today: NaiveDate, horizon_days: u64) -> bool {
    match today.checked_add_days(Days::new(horizon_days)) {
        Some(limit) => due <= limit,
        // Horizon overflows the calendar; everything not overdue qualifies.
        None => true,
    }
}
