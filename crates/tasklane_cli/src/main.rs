//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklane_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasklane_core::{TaskDraft, TaskEngine};

fn main() {
    println!("tasklane_core version={}", tasklane_core::core_version());

    let engine = TaskEngine::new();
    let draft = TaskDraft {
        title: "Write report".to_string(),
        due: Some("2025-01-01".to_string()),
        priority: 2,
        status: Some("Pending".to_string()),
    };

    match engine.add_task("demo", draft) {
        Ok(id) => println!("added task id={id}"),
        Err(err) => {
            eprintln!("add failed kind={} error={err}", err.kind());
            std::process::exit(1);
        }
    }

    match engine.list_tasks_json("demo") {
        Ok(json) => println!("tasks={json}"),
        Err(err) => eprintln!("list failed kind={} error={err}", err.kind()),
    }

    match engine.undo("demo") {
        Ok(()) => println!("undo ok, tasks now={}", engine.list_tasks("demo").len()),
        Err(err) => eprintln!("undo failed kind={} error={err}", err.kind()),
    }
}
