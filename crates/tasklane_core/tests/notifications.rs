use chrono::NaiveDate;
use tasklane_core::{
    HistoryConfig, NotificationConfig, NotificationKind, TaskDraft, TaskEngine,
};

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("test date should parse")
}

fn draft(title: &str, priority: u32, due: &str, status: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        due: Some(due.to_string()),
        priority,
        status: Some(status.to_string()),
    }
}

#[test]
fn notifications_are_ordered_by_task_id_then_rule() {
    let engine = TaskEngine::new();
    // id 1: due soon. id 2: overdue AND stale high priority. id 3: quiet.
    engine
        .add_task("alice", draft("due soon", 1, "2025-06-02", "Pending"))
        .expect("add");
    engine
        .add_task("alice", draft("late and hot", 9, "2025-05-01", "Pending"))
        .expect("add");
    engine
        .add_task("alice", draft("quiet", 1, "2030-01-01", "Done"))
        .expect("add");

    let today = day("2025-06-01");
    let out = engine.notifications_on("alice", today);

    let shape: Vec<(u64, NotificationKind)> = out.iter().map(|n| (n.task_id, n.kind)).collect();
    assert_eq!(
        shape,
        vec![
            (1, NotificationKind::DueSoon),
            (2, NotificationKind::Overdue),
            (2, NotificationKind::StaleHighPriority),
        ]
    );
}

#[test]
fn projection_is_idempotent_until_a_mutation_happens() {
    let engine = TaskEngine::new();
    engine
        .add_task("alice", draft("late", 1, "2025-01-01", "Pending"))
        .expect("add");

    let today = day("2025-06-01");
    let first = engine.notifications_on("alice", today);
    let second = engine.notifications_on("alice", today);
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).expect("serialize");
    let second_json = serde_json::to_string(&second).expect("serialize");
    assert_eq!(first_json, second_json);

    engine.remove_task("alice", 1).expect("remove");
    assert!(engine.notifications_on("alice", today).is_empty());

    // Undo brings the task and therefore the alert back, unchanged.
    engine.undo("alice").expect("undo");
    assert_eq!(engine.notifications_on("alice", today), first);
}

#[test]
fn notification_json_carries_labels_and_task_ids() {
    let engine = TaskEngine::new();
    engine
        .add_task("alice", draft("late", 1, "2025-01-01", "Pending"))
        .expect("add");

    let out = engine.notifications_on("alice", day("2025-06-01"));
    let json = serde_json::to_string(&out).expect("serialize");
    assert!(json.contains(r#""kind":"OVERDUE""#));
    assert!(json.contains(r#""task_id":1"#));
}

#[test]
fn thresholds_come_from_configuration() {
    let config = NotificationConfig {
        due_soon_horizon_days: 10,
        high_priority_threshold: 2,
    };
    let engine = TaskEngine::with_config(config, HistoryConfig::default());

    engine
        .add_task("alice", draft("wide horizon", 1, "2025-06-09", "InProgress"))
        .expect("add");
    engine
        .add_task("alice", draft("low bar", 2, "2030-01-01", "Pending"))
        .expect("add");

    let out = engine.notifications_on("alice", day("2025-06-01"));
    let kinds: Vec<NotificationKind> = out.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![NotificationKind::DueSoon, NotificationKind::StaleHighPriority]
    );
}

#[test]
fn unknown_username_yields_empty_and_creates_no_state() {
    let engine = TaskEngine::new();
    assert!(engine.notifications_on("ghost", day("2025-06-01")).is_empty());
    assert!(engine.usernames().is_empty());
}
