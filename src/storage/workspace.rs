//! Workspace: the board wired to its store
//!
//! [`Workspace`] is the entry point the CLI works against. It loads the
//! board from a [`KeyValue`] store once at startup (seeding demonstration
//! tasks on first run), forwards every operation to the board, and writes
//! changed state back immediately: tasks after every applying mutation,
//! the known-tags list whenever it grows, the theme on change. The filter
//! is session state and is never written.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::{Board, Filter, TagOutcome, Task, TaskId, Theme};

use super::kv::KeyValue;
use super::records;

/// A board bound to a persistence backend
pub struct Workspace<S: KeyValue> {
    board: Board,
    store: S,
}

impl<S: KeyValue> Workspace<S> {
    /// Opens a workspace, loading persisted state or seeding a first run.
    ///
    /// Loading is lenient (see [`records`]): older record shapes upgrade in
    /// place, and tags found on tasks but missing from the known-tags list
    /// are registered (and the repaired list written back).
    pub fn open(store: S) -> Result<Self> {
        let (tasks, seeded) = match store.get(records::TASKS_KEY)? {
            Some(json) => (
                records::decode_tasks(&json).context("Failed to load tasks from store")?,
                false,
            ),
            None => (records::demo_tasks(), true),
        };

        let theme = store
            .get(records::THEME_KEY)?
            .map(|s| Theme::parse_lenient(&s))
            .unwrap_or_default();

        let known_tags = match store.get(records::TAGS_KEY)? {
            Some(json) => {
                records::decode_tags(&json).context("Failed to load known tags from store")?
            }
            None => Vec::new(),
        };

        let mut board = Board::from_parts(tasks, theme, known_tags);

        // Repair the known-tags list from tags carried by the tasks
        let task_tags: Vec<String> = board
            .tasks()
            .iter()
            .flat_map(|t| t.tags.clone())
            .collect();
        let mut tags_grew = false;
        for tag in &task_tags {
            tags_grew |= board.register_tag(tag);
        }

        let mut workspace = Self { board, store };
        if seeded {
            workspace.save_tasks()?;
        }
        if tags_grew {
            workspace.save_tags()?;
        }

        Ok(workspace)
    }

    /// Read-only access to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the workspace, returning the backing store
    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // Operations (write-through)
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, text: &str) -> Result<Option<TaskId>> {
        let id = self.board.add_task(text);
        if id.is_some() {
            self.save_tasks()?;
        }
        Ok(id)
    }

    pub fn toggle_completed(&mut self, id: &TaskId) -> Result<Option<bool>> {
        let celebration = self.board.toggle_completed(id);
        if celebration.is_some() {
            self.save_tasks()?;
        }
        Ok(celebration)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Result<bool> {
        let deleted = self.board.delete_task(id);
        if deleted {
            self.save_tasks()?;
        }
        Ok(deleted)
    }

    pub fn toggle_star(&mut self, id: &TaskId) -> Result<Option<bool>> {
        let starred = self.board.toggle_star(id);
        if starred.is_some() {
            self.save_tasks()?;
        }
        Ok(starred)
    }

    pub fn edit_text(&mut self, id: &TaskId, new_text: &str) -> Result<bool> {
        let changed = self.board.edit_text(id, new_text);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    pub fn add_tag(&mut self, id: &TaskId, tag: &str) -> Result<Option<TagOutcome>> {
        let outcome = self.board.add_tag(id, tag);
        if let Some(outcome) = outcome {
            if outcome.tagged {
                self.save_tasks()?;
            }
            if outcome.registered {
                self.save_tags()?;
            }
        }
        Ok(outcome)
    }

    pub fn remove_tag(&mut self, id: &TaskId, tag: &str) -> Result<bool> {
        let removed = self.board.remove_tag(id, tag);
        if removed {
            self.save_tasks()?;
        }
        Ok(removed)
    }

    pub fn set_due_date(&mut self, id: &TaskId, date: NaiveDate) -> Result<bool> {
        let changed = self.board.set_due_date(id, date);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    pub fn clear_due_date(&mut self, id: &TaskId) -> Result<bool> {
        let changed = self.board.clear_due_date(id);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    pub fn clear_completed(&mut self) -> Result<usize> {
        let removed = self.board.clear_completed();
        if removed > 0 {
            self.save_tasks()?;
        }
        Ok(removed)
    }

    pub fn reorder(&mut self, dragged: &TaskId, before: Option<&TaskId>) -> Result<bool> {
        let moved = self.board.reorder(dragged, before);
        if moved {
            self.save_tasks()?;
        }
        Ok(moved)
    }

    /// Session-only; never written to the store
    pub fn set_filter(&mut self, filter: Filter) {
        self.board.set_filter(filter);
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<bool> {
        let changed = self.board.set_theme(theme);
        if changed {
            self.store
                .set(records::THEME_KEY, self.board.theme().as_str())?;
        }
        Ok(changed)
    }

    pub fn undo(&mut self) -> Result<bool> {
        let undone = self.board.undo();
        if undone {
            self.save_tasks()?;
        }
        Ok(undone)
    }

    /// Pure read; see [`Board::projection`]
    pub fn projection(&self, filter: Filter) -> Vec<Task> {
        self.board.projection(filter)
    }

    // -----------------------------------------------------------------------
    // Write-through
    // -----------------------------------------------------------------------

    fn save_tasks(&mut self) -> Result<()> {
        let json = records::encode_tasks(self.board.tasks())?;
        self.store.set(records::TASKS_KEY, &json)
    }

    fn save_tags(&mut self) -> Result<()> {
        let json = records::encode_tags(self.board.known_tags())?;
        self.store.set(records::TAGS_KEY, &json)
    }
}
