//! Persisted record shapes
//!
//! The store holds three logical entries: the task collection under
//! [`TASKS_KEY`] (a JSON array), the theme under [`THEME_KEY`] (a raw
//! string), and the known-tags list under [`TAGS_KEY`] (a JSON array of
//! strings).
//!
//! Loading is an explicit versionless migration, not strict deserialization:
//! only the task text is required. Records written by older versions of the
//! tool, down to the original `{"text": ..., "completed": ...}` shape, load
//! with missing fields default-filled, missing IDs regenerated, and
//! duplicate IDs repaired.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use anyhow::{Context, Result};

use crate::domain::{Task, TaskId};

/// Store key for the task collection
pub const TASKS_KEY: &str = "todos";

/// Store key for the theme
pub const THEME_KEY: &str = "theme";

/// Store key for the known-tags list
pub const TAGS_KEY: &str = "known-tags";

/// A task record as found in the store, with every historical shape accepted
#[derive(Debug, Deserialize)]
struct RawTask {
    #[serde(default)]
    id: Option<TaskId>,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    starred: bool,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    order: Option<usize>,
}

/// Serializes the task collection for the store
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize tasks")
}

/// Deserializes the task collection, upgrading older record shapes.
///
/// Missing `completed`/`starred`/`tags`/`due_date` default-fill; a missing
/// `order` becomes 0 (the projection's stable sort keeps the stored
/// sequence); a missing `created_at` becomes now; missing or duplicate IDs
/// are regenerated.
pub fn decode_tasks(json: &str) -> Result<Vec<Task>> {
    let raw: Vec<RawTask> = serde_json::from_str(json).context("Failed to parse tasks")?;

    let mut tasks: Vec<Task> = Vec::with_capacity(raw.len());
    for record in raw {
        let mut id = record
            .id
            .unwrap_or_else(|| TaskId::new(&record.text, Utc::now()));
        while tasks.iter().any(|t| t.id == id) {
            id = TaskId::new(&record.text, Utc::now());
        }

        tasks.push(Task {
            id,
            text: record.text,
            completed: record.completed,
            starred: record.starred,
            tags: record.tags,
            due_date: record.due_date,
            created_at: record.created_at.unwrap_or_else(Utc::now),
            order: record.order.unwrap_or(0),
        });
    }

    Ok(tasks)
}

/// Serializes the known-tags list for the store
pub fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("Failed to serialize known tags")
}

/// Deserializes the known-tags list
pub fn decode_tags(json: &str) -> Result<Vec<String>> {
    serde_json::from_str(json).context("Failed to parse known tags")
}

/// The fixed demonstration tasks seeded on first run
pub fn demo_tasks() -> Vec<Task> {
    let mut welcome = Task::new(
        TaskId::new("welcome", Utc::now()),
        "Welcome to tick! Add a task with `tick add`",
        0,
    );
    welcome.add_tag("tips");

    let mut star = Task::new(
        TaskId::new("star", Utc::now()),
        "Star a task to pin it to the favorites view",
        1,
    );
    star.starred = true;
    star.add_tag("tips");

    let mut done = Task::new(
        TaskId::new("done", Utc::now()),
        "Completed tasks can be swept away with `tick clear-done`",
        2,
    );
    done.completed = true;

    vec![welcome, star, done]
}
