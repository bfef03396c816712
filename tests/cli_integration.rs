//! CLI integration tests for Tick
//!
//! These tests drive the binary end to end against isolated store files,
//! verifying that commands compose correctly and state survives between
//! invocations.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the tick binary, isolated to `dir`
fn tick(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tick"));
    cmd.env("TICK_STORE", dir.path().join("store.json"));
    // Keep any real user config out of the picture
    cmd.env("HOME", dir.path());
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd
}

/// Create a store holding an empty task collection (skips first-run seeding)
fn setup_empty() -> TempDir {
    let dir = TempDir::new().unwrap();
    let map = serde_json::json!({ "todos": "[]" });
    fs::write(
        dir.path().join("store.json"),
        serde_json::to_string(&map).unwrap(),
    )
    .unwrap();
    dir
}

/// List all tasks as parsed JSON records
fn list_json(dir: &TempDir) -> Vec<serde_json::Value> {
    let output = tick(dir)
        .args(["list", "--filter", "all", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

/// ID of the task with the given text
fn id_of(dir: &TempDir, text: &str) -> String {
    list_json(dir)
        .iter()
        .find(|t| t["text"] == text)
        .and_then(|t| t["id"].as_str())
        .unwrap()
        .to_string()
}

// =============================================================================
// First Run
// =============================================================================

#[test]
fn test_first_run_seeds_demo_tasks() {
    let dir = TempDir::new().unwrap();

    tick(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to tick"));

    // The seed was written through
    assert!(dir.path().join("store.json").is_file());
}

#[test]
fn test_empty_store_is_not_reseeded() {
    let dir = setup_empty();

    tick(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks"));
}

// =============================================================================
// Adding and Listing
// =============================================================================

#[test]
fn test_add_then_list() {
    let dir = setup_empty();

    tick(&dir)
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    tick(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));
}

#[test]
fn test_add_empty_text_fails() {
    let dir = setup_empty();

    tick(&dir)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_add_json_output() {
    let dir = setup_empty();

    let output = tick(&dir)
        .args(["add", "Buy milk", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(v["id"].as_str().unwrap().starts_with("t-"));
    assert_eq!(v["text"], "Buy milk");
}

#[test]
fn test_list_filters() {
    let dir = setup_empty();
    tick(&dir).args(["add", "open task"]).assert().success();
    tick(&dir).args(["add", "done task"]).assert().success();

    let id = id_of(&dir, "done task");
    tick(&dir).args(["done", &id]).assert().success();

    tick(&dir)
        .args(["list", "--filter", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open task").and(predicate::str::contains("done task").not()));

    tick(&dir)
        .args(["list", "--filter", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done task").and(predicate::str::contains("open task").not()));
}

#[test]
fn test_list_favorites() {
    let dir = setup_empty();
    tick(&dir).args(["add", "plain"]).assert().success();
    tick(&dir).args(["add", "pinned"]).assert().success();

    let id = id_of(&dir, "pinned");
    tick(&dir).args(["star", &id]).assert().success();

    tick(&dir)
        .args(["list", "--filter", "favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pinned").and(predicate::str::contains("plain").not()));
}

// =============================================================================
// Completing
// =============================================================================

#[test]
fn test_done_celebrates_when_everything_is_complete() {
    let dir = setup_empty();
    tick(&dir).args(["add", "only task"]).assert().success();

    let id = id_of(&dir, "only task");
    tick(&dir)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("All tasks completed!"));

    // Toggling back reopens without celebrating
    tick(&dir)
        .args(["done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened"));
}

#[test]
fn test_done_unknown_id_fails() {
    let dir = setup_empty();

    tick(&dir)
        .args(["done", "t-0000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found"));
}

#[test]
fn test_malformed_id_fails() {
    let dir = setup_empty();

    tick(&dir)
        .args(["done", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid task ID"));
}

#[test]
fn test_clear_done() {
    let dir = setup_empty();
    tick(&dir).args(["add", "keep"]).assert().success();
    tick(&dir).args(["add", "sweep"]).assert().success();

    let id = id_of(&dir, "sweep");
    tick(&dir).args(["done", &id]).assert().success();

    tick(&dir)
        .arg("clear-done")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1"));

    let tasks = list_json(&dir);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "keep");
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_edit_replaces_text() {
    let dir = setup_empty();
    tick(&dir).args(["add", "tpyo"]).assert().success();

    let id = id_of(&dir, "tpyo");
    tick(&dir)
        .args(["edit", &id, "typo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    assert_eq!(list_json(&dir)[0]["text"], "typo");
}

#[test]
fn test_edit_to_empty_deletes() {
    let dir = setup_empty();
    tick(&dir).args(["add", "ephemeral"]).assert().success();

    let id = id_of(&dir, "ephemeral");
    tick(&dir)
        .args(["edit", &id, ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert!(list_json(&dir).is_empty());
}

#[test]
fn test_edit_completed_task_fails() {
    let dir = setup_empty();
    tick(&dir).args(["add", "finished"]).assert().success();

    let id = id_of(&dir, "finished");
    tick(&dir).args(["done", &id]).assert().success();

    tick(&dir)
        .args(["edit", &id, "rewritten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be edited"));
}

// =============================================================================
// Reordering
// =============================================================================

#[test]
fn test_move_before_target() {
    let dir = setup_empty();
    for text in ["A", "B", "C"] {
        tick(&dir).args(["add", text]).assert().success();
    }

    let a = id_of(&dir, "A");
    let c = id_of(&dir, "C");
    tick(&dir)
        .args(["move", &c, "--before", &a])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved"));

    let texts: Vec<String> = list_json(&dir)
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["C", "A", "B"]);
}

#[test]
fn test_move_to_end() {
    let dir = setup_empty();
    for text in ["A", "B", "C"] {
        tick(&dir).args(["add", text]).assert().success();
    }

    let a = id_of(&dir, "A");
    tick(&dir).args(["move", &a]).assert().success();

    let texts: Vec<String> = list_json(&dir)
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["B", "C", "A"]);
}

// =============================================================================
// Undo
// =============================================================================

#[test]
fn test_undo_restores_deleted_task() {
    let dir = setup_empty();
    tick(&dir).args(["add", "precious"]).assert().success();

    let id = id_of(&dir, "precious");
    tick(&dir).args(["rm", &id]).assert().success();
    assert!(list_json(&dir).is_empty());

    tick(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undid"));

    assert_eq!(list_json(&dir)[0]["text"], "precious");
}

#[test]
fn test_undo_does_not_span_invocations() {
    // History lives in memory, so a fresh process has nothing to undo
    let dir = setup_empty();
    tick(&dir).args(["add", "sticky"]).assert().success();

    tick(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));

    assert_eq!(list_json(&dir).len(), 1);
}

// =============================================================================
// Tags and Due Dates
// =============================================================================

#[test]
fn test_tag_lifecycle() {
    let dir = setup_empty();
    tick(&dir).args(["add", "chore"]).assert().success();

    let id = id_of(&dir, "chore");
    tick(&dir)
        .args(["tag", "add", &id, "errand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged"));

    tick(&dir)
        .args(["tag", "rm", &id, "errand"])
        .assert()
        .success();

    // The known-tags list keeps the label after removal
    tick(&dir)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("#errand"));

    assert!(list_json(&dir)[0]["tags"].as_array().unwrap().is_empty());
}

#[test]
fn test_due_date_set_and_clear() {
    let dir = setup_empty();
    tick(&dir).args(["add", "deadline"]).assert().success();

    let id = id_of(&dir, "deadline");
    tick(&dir)
        .args(["due", &id, "2099-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("due 2099-01-15"));

    assert_eq!(list_json(&dir)[0]["due_date"], "2099-01-15");
    assert_eq!(list_json(&dir)[0]["due_status"], "normal");

    tick(&dir)
        .args(["due", &id, "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    assert!(list_json(&dir)[0]["due_date"].is_null());
}

#[test]
fn test_due_requires_date_or_clear() {
    let dir = setup_empty();
    tick(&dir).args(["add", "deadline"]).assert().success();

    let id = id_of(&dir, "deadline");
    tick(&dir).args(["due", &id]).assert().failure();
}

// =============================================================================
// Theme and Status
// =============================================================================

#[test]
fn test_theme_persists() {
    let dir = setup_empty();

    tick(&dir).args(["theme", "dark"]).assert().success();

    tick(&dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_status_summarizes() {
    let dir = setup_empty();
    tick(&dir).args(["add", "one"]).assert().success();
    tick(&dir).args(["add", "two"]).assert().success();

    let id = id_of(&dir, "one");
    tick(&dir).args(["done", &id]).assert().success();

    tick(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 task(s): 1 open, 1 done"));
}

// =============================================================================
// Legacy Stores
// =============================================================================

#[test]
fn test_legacy_records_load() {
    let dir = TempDir::new().unwrap();
    let map = serde_json::json!({
        "todos": "[{\"text\":\"Old task\",\"completed\":true}]",
    });
    fs::write(
        dir.path().join("store.json"),
        serde_json::to_string(&map).unwrap(),
    )
    .unwrap();

    let tasks = list_json(&dir);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Old task");
    assert_eq!(tasks[0]["completed"], true);
    assert!(tasks[0]["id"].as_str().unwrap().starts_with("t-"));
}
