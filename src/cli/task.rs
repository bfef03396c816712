//! Mutating task commands

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::TaskId;
use crate::storage::{KeyValue, Workspace};

use super::output::Output;

fn resolve(id_str: &str) -> Result<TaskId> {
    let id: TaskId = id_str.parse()?;
    Ok(id)
}

pub fn add<S: KeyValue>(ws: &mut Workspace<S>, output: &Output, text: &str) -> Result<()> {
    let Some(id) = ws.add_task(text)? else {
        anyhow::bail!("Task text is empty");
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "text": text.trim(),
        }));
    } else {
        output.success(&format!("Added {} - {}", id, text.trim()));
    }

    Ok(())
}

pub fn done<S: KeyValue>(ws: &mut Workspace<S>, output: &Output, id_str: &str) -> Result<()> {
    let id = resolve(id_str)?;
    let Some(celebration) = ws.toggle_completed(&id)? else {
        anyhow::bail!("Task not found: {}", id);
    };
    let completed = ws.board().find(&id).is_some_and(|t| t.completed);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "completed": completed,
            "all_completed": celebration,
        }));
    } else if celebration {
        output.success(&format!("Completed {}. All tasks completed!", id));
    } else if completed {
        output.success(&format!("Completed {}", id));
    } else {
        output.success(&format!("Reopened {}", id));
    }

    Ok(())
}

pub fn star<S: KeyValue>(ws: &mut Workspace<S>, output: &Output, id_str: &str) -> Result<()> {
    let id = resolve(id_str)?;
    let Some(starred) = ws.toggle_star(&id)? else {
        anyhow::bail!("Task not found: {}", id);
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "starred": starred,
        }));
    } else if starred {
        output.success(&format!("Starred {}", id));
    } else {
        output.success(&format!("Unstarred {}", id));
    }

    Ok(())
}

pub fn edit<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    id_str: &str,
    text: &str,
) -> Result<()> {
    let id = resolve(id_str)?;
    let Some(task) = ws.board().find(&id) else {
        anyhow::bail!("Task not found: {}", id);
    };
    if task.completed {
        anyhow::bail!("Completed tasks cannot be edited");
    }

    let changed = ws.edit_text(&id, text)?;
    let deleted = ws.board().find(&id).is_none();

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "changed": changed,
            "deleted": deleted,
        }));
    } else if deleted {
        output.success(&format!("Deleted {} (empty text)", id));
    } else if changed {
        output.success(&format!("Updated {}", id));
    } else {
        output.success("No change");
    }

    Ok(())
}

pub fn remove<S: KeyValue>(ws: &mut Workspace<S>, output: &Output, id_str: &str) -> Result<()> {
    let id = resolve(id_str)?;
    if !ws.delete_task(&id)? {
        anyhow::bail!("Task not found: {}", id);
    }

    if output.is_json() {
        output.data(&serde_json::json!({ "id": id.to_string(), "deleted": true }));
    } else {
        output.success(&format!("Deleted {}", id));
    }

    Ok(())
}

pub fn tag_add<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    id_str: &str,
    tag: &str,
) -> Result<()> {
    let id = resolve(id_str)?;
    if ws.board().find(&id).is_none() {
        anyhow::bail!("Task not found: {}", id);
    }
    let Some(outcome) = ws.add_tag(&id, tag)? else {
        anyhow::bail!("Tag is empty");
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "tag": tag.trim(),
            "tagged": outcome.tagged,
            "new_tag": outcome.registered,
        }));
    } else if outcome.tagged {
        output.success(&format!("Tagged {} with #{}", id, tag.trim()));
    } else {
        output.success(&format!("{} already has #{}", id, tag.trim()));
    }

    Ok(())
}

pub fn tag_remove<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    id_str: &str,
    tag: &str,
) -> Result<()> {
    let id = resolve(id_str)?;
    if ws.board().find(&id).is_none() {
        anyhow::bail!("Task not found: {}", id);
    }
    let removed = ws.remove_tag(&id, tag)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "tag": tag,
            "removed": removed,
        }));
    } else if removed {
        output.success(&format!("Removed #{} from {}", tag, id));
    } else {
        output.success(&format!("{} has no #{}", id, tag));
    }

    Ok(())
}

pub fn due<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    id_str: &str,
    date: Option<NaiveDate>,
    clear: bool,
) -> Result<()> {
    let id = resolve(id_str)?;
    if ws.board().find(&id).is_none() {
        anyhow::bail!("Task not found: {}", id);
    }

    let changed = match (date, clear) {
        (Some(date), false) => ws.set_due_date(&id, date)?,
        (None, true) => ws.clear_due_date(&id)?,
        (Some(_), true) => anyhow::bail!("Give either a date or --clear, not both"),
        (None, false) => anyhow::bail!("Give a due date (YYYY-MM-DD) or --clear"),
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "due_date": date.map(|d| d.to_string()),
            "changed": changed,
        }));
    } else if !changed {
        output.success("No change");
    } else if let Some(date) = date {
        output.success(&format!("{} due {}", id, date));
    } else {
        output.success(&format!("Cleared due date on {}", id));
    }

    Ok(())
}

pub fn move_task<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    id_str: &str,
    before_str: Option<&str>,
) -> Result<()> {
    let id = resolve(id_str)?;
    if ws.board().find(&id).is_none() {
        anyhow::bail!("Task not found: {}", id);
    }
    let before = before_str.map(resolve).transpose()?;

    let moved = ws.reorder(&id, before.as_ref())?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id.to_string(),
            "before": before.map(|b| b.to_string()),
            "moved": moved,
        }));
    } else if moved {
        match before_str {
            Some(before) => output.success(&format!("Moved {} before {}", id, before)),
            None => output.success(&format!("Moved {} to the end", id)),
        }
    } else {
        output.success("No change");
    }

    Ok(())
}

pub fn clear_done<S: KeyValue>(ws: &mut Workspace<S>, output: &Output) -> Result<()> {
    let removed = ws.clear_completed()?;

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else if removed == 0 {
        output.success("No completed tasks to clear");
    } else {
        output.success(&format!("Cleared {} completed task(s)", removed));
    }

    Ok(())
}

pub fn undo<S: KeyValue>(ws: &mut Workspace<S>, output: &Output) -> Result<()> {
    let undone = ws.undo()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "undone": undone,
            "remaining": ws.board().history_len(),
        }));
    } else if undone {
        output.success("Undid the last change");
    } else {
        output.success("Nothing to undo");
    }

    Ok(())
}
