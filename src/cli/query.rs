//! Read-only board queries

use anyhow::Result;
use chrono::Local;

use crate::domain::{DueStatus, Filter, Theme};
use crate::storage::{KeyValue, Workspace};

use super::output::Output;

pub fn list<S: KeyValue>(ws: &Workspace<S>, output: &Output, filter: Filter) -> Result<()> {
    let today = Local::now().date_naive();
    let tasks = ws.projection(filter);

    if output.is_json() {
        let items: Vec<_> = tasks
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id.to_string(),
                    "text": t.text,
                    "completed": t.completed,
                    "starred": t.starred,
                    "tags": t.tags,
                    "due_date": t.due_date.map(|d| d.to_string()),
                    "due_status": t.due_status(today).map(|s| s.label()),
                    "order": t.order,
                    "created_at": t.created_at,
                })
            })
            .collect();
        output.data(&items);
    } else if tasks.is_empty() {
        println!("No tasks ({})", filter.as_str());
    } else {
        println!("{:<10} {:<6} {:<22} TEXT", "ID", "STATE", "DUE");
        println!("{}", "-".repeat(70));

        for task in &tasks {
            let state = if task.completed { "done" } else { "open" };

            let due = match (task.due_date, task.due_status(today)) {
                (Some(date), Some(DueStatus::Normal)) => date.to_string(),
                (Some(date), Some(status)) => format!("{} ({})", date, status.label()),
                _ => "-".to_string(),
            };

            let star = if task.starred { "* " } else { "" };
            let tags = task
                .tags
                .iter()
                .map(|t| format!(" #{}", t))
                .collect::<String>();

            println!("{:<10} {:<6} {:<22} {}{}{}", task.id, state, due, star, task.text, tags);
        }
    }

    Ok(())
}

pub fn status<S: KeyValue>(ws: &Workspace<S>, output: &Output) -> Result<()> {
    let today = Local::now().date_naive();
    let board = ws.board();

    let total = board.len();
    let completed = board.tasks().iter().filter(|t| t.completed).count();
    let open = total - completed;
    let starred = board.tasks().iter().filter(|t| t.starred).count();
    let overdue = board
        .tasks()
        .iter()
        .filter(|t| t.due_status(today) == Some(DueStatus::Overdue))
        .count();
    let due_soon = board
        .tasks()
        .iter()
        .filter(|t| t.due_status(today) == Some(DueStatus::DueSoon))
        .count();

    if output.is_json() {
        output.data(&serde_json::json!({
            "total": total,
            "open": open,
            "completed": completed,
            "starred": starred,
            "overdue": overdue,
            "due_soon": due_soon,
            "all_completed": board.all_completed(),
            "theme": board.theme().as_str(),
            "undo_steps": board.history_len(),
        }));
    } else {
        println!(
            "{} task(s): {} open, {} done, {} starred",
            total, open, completed, starred
        );
        if overdue > 0 || due_soon > 0 {
            println!("{} overdue, {} due soon", overdue, due_soon);
        }
        if board.all_completed() {
            println!("All tasks completed!");
        }
        println!("Theme: {}", board.theme().as_str());
    }

    Ok(())
}

pub fn tags<S: KeyValue>(ws: &Workspace<S>, output: &Output) -> Result<()> {
    let known = ws.board().known_tags();

    if output.is_json() {
        output.data(&known.to_vec());
    } else if known.is_empty() {
        println!("No tags yet");
    } else {
        for tag in known {
            println!("#{}", tag);
        }
    }

    Ok(())
}

pub fn theme<S: KeyValue>(
    ws: &mut Workspace<S>,
    output: &Output,
    theme: Option<Theme>,
) -> Result<()> {
    match theme {
        Some(theme) => {
            let changed = ws.set_theme(theme)?;
            if output.is_json() {
                output.data(&serde_json::json!({
                    "theme": theme.as_str(),
                    "changed": changed,
                }));
            } else {
                output.success(&format!("Theme set to {}", theme.as_str()));
            }
        }
        None => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "theme": ws.board().theme().as_str(),
                }));
            } else {
                println!("{}", ws.board().theme().as_str());
            }
        }
    }

    Ok(())
}
