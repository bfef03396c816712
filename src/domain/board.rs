//! The task board
//!
//! [`Board`] is the in-memory state machine behind the whole tool: it owns
//! the ordered task collection, the active filter, the theme, the known-tags
//! list, and the undo history, and it exposes every mutation as a method.
//!
//! Mutations are defensive: an operation that would change nothing (absent
//! id, empty text, nothing to clear) returns without touching the history.
//! An operation that applies pushes a snapshot of the collection onto the
//! history *before* its change, so one `undo` rewinds exactly one operation.
//!
//! The board performs no I/O. Persistence is wired in by
//! [`crate::storage::Workspace`], which inspects each operation's return
//! value to decide what to write.

use chrono::{NaiveDate, Utc};

use super::history::History;
use super::id::TaskId;
use super::task::{Filter, Task, Theme};

/// What an [`Board::add_tag`] call actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOutcome {
    /// The tag was added to the task's tag set
    pub tagged: bool,
    /// The tag was new to the global known-tags list
    pub registered: bool,
}

/// The task-list state machine
#[derive(Debug, Clone, Default)]
pub struct Board {
    tasks: Vec<Task>,
    filter: Filter,
    theme: Theme,
    known_tags: Vec<String>,
    history: History,
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassembles a board from persisted state (fresh history, default filter)
    pub fn from_parts(tasks: Vec<Task>, theme: Theme, known_tags: Vec<String>) -> Self {
        Self {
            tasks,
            filter: Filter::default(),
            theme,
            known_tags,
            history: History::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Every tag label ever used, in first-use order
    pub fn known_tags(&self) -> &[String] {
        &self.known_tags
    }

    /// Number of undo steps currently available
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the board is non-empty and every task is completed
    pub fn all_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Adds a task with the given text at the end of the list.
    ///
    /// The text is trimmed; empty text is a no-op. Returns the new task's id.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut id = TaskId::new(text, Utc::now());
        // Regenerate on the (unlikely) hash collision with a live task
        while self.find(&id).is_some() {
            id = TaskId::new(text, Utc::now());
        }

        self.snapshot();
        let order = self.tasks.len();
        self.tasks.push(Task::new(id.clone(), text, order));
        Some(id)
    }

    /// Flips a task's completed flag.
    ///
    /// Returns `Some(true)` when this toggle transitioned the board into the
    /// all-completed state (the celebration edge), `Some(false)` for any
    /// other applied toggle, and `None` when the id doesn't resolve.
    pub fn toggle_completed(&mut self, id: &TaskId) -> Option<bool> {
        let index = self.index_of(id)?;
        self.snapshot();

        let was_all_completed = self.all_completed();
        self.tasks[index].completed = !self.tasks[index].completed;

        Some(self.all_completed() && !was_all_completed)
    }

    /// Removes a task. Returns true if it existed.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.snapshot();
        self.tasks.remove(index);
        self.reassign_orders();
        true
    }

    /// Flips a task's starred flag. Returns the new value when applied.
    pub fn toggle_star(&mut self, id: &TaskId) -> Option<bool> {
        let index = self.index_of(id)?;
        self.snapshot();
        self.tasks[index].starred = !self.tasks[index].starred;
        Some(self.tasks[index].starred)
    }

    /// Replaces a task's text.
    ///
    /// Completed tasks are not editable. Text that trims to empty deletes
    /// the task instead. Returns true if anything changed.
    pub fn edit_text(&mut self, id: &TaskId, new_text: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.tasks[index].completed {
            return false;
        }

        let new_text = new_text.trim();
        if new_text.is_empty() {
            return self.delete_task(id);
        }
        if self.tasks[index].text == new_text {
            return false;
        }

        self.snapshot();
        self.tasks[index].text = new_text.to_string();
        true
    }

    /// Adds a tag to a task's tag set.
    ///
    /// Duplicate adds leave the task untouched, but the tag is still
    /// registered into the global known-tags list whenever it is new there.
    /// Returns `None` when the id doesn't resolve or the tag trims to empty.
    pub fn add_tag(&mut self, id: &TaskId, tag: &str) -> Option<TagOutcome> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        let index = self.index_of(id)?;

        let tagged = if self.tasks[index].tags.iter().any(|t| t == tag) {
            false
        } else {
            self.snapshot();
            self.tasks[index].add_tag(tag)
        };
        let registered = self.register_tag(tag);

        Some(TagOutcome { tagged, registered })
    }

    /// Removes a tag from a task's tag set. The known-tags list is
    /// append-only and keeps the label. Returns true if the tag was present.
    pub fn remove_tag(&mut self, id: &TaskId, tag: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if !self.tasks[index].tags.iter().any(|t| t == tag) {
            return false;
        }
        self.snapshot();
        self.tasks[index].remove_tag(tag)
    }

    /// Sets a task's due date. Returns true if anything changed.
    pub fn set_due_date(&mut self, id: &TaskId, date: NaiveDate) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.tasks[index].due_date == Some(date) {
            return false;
        }
        self.snapshot();
        self.tasks[index].due_date = Some(date);
        true
    }

    /// Clears a task's due date. Returns true if one was set.
    pub fn clear_due_date(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.tasks[index].due_date.is_none() {
            return false;
        }
        self.snapshot();
        self.tasks[index].due_date = None;
        true
    }

    /// Removes every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let count = self.tasks.iter().filter(|t| t.completed).count();
        if count == 0 {
            return 0;
        }
        self.snapshot();
        self.tasks.retain(|t| !t.completed);
        self.reassign_orders();
        count
    }

    /// Moves a task to just before another task, or to the end of the list.
    ///
    /// `before = None` (or a `before` id that doesn't resolve) appends the
    /// task last. After the move every task's `order` is reassigned to its
    /// positional index. Returns true if the ordering actually changed.
    pub fn reorder(&mut self, dragged: &TaskId, before: Option<&TaskId>) -> bool {
        let Some(from) = self.index_of(dragged) else {
            return false;
        };
        if before == Some(dragged) {
            return false;
        }

        let mut next = self.tasks.clone();
        let task = next.remove(from);
        let at = before
            .and_then(|b| next.iter().position(|t| &t.id == b))
            .unwrap_or(next.len());
        next.insert(at, task);

        if next.iter().map(|t| &t.id).eq(self.tasks.iter().map(|t| &t.id)) {
            return false;
        }

        self.history.push(std::mem::replace(&mut self.tasks, next));
        self.reassign_orders();
        true
    }

    /// Changes the active filter. Not undoable, never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Changes the theme. Not undoable. Returns true if it changed.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        true
    }

    /// Registers a tag into the known-tags list. Returns true if it was new.
    pub fn register_tag(&mut self, tag: &str) -> bool {
        if self.known_tags.iter().any(|t| t == tag) {
            false
        } else {
            self.known_tags.push(tag.to_string());
            true
        }
    }

    /// Rewinds the task collection to the most recent snapshot.
    ///
    /// Filter, theme, and known tags are unaffected. Returns true if a
    /// snapshot was applied, false when the history is exhausted.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.tasks = snapshot;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Projection
    // -----------------------------------------------------------------------

    /// Returns the tasks passing `filter`, sorted ascending by `order`.
    ///
    /// Pure: the board is never mutated. The sort is stable, so tasks with
    /// equal orders (legacy records default to 0) keep their stored sequence.
    pub fn projection(&self, filter: Filter) -> Vec<Task> {
        let mut view: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        view.sort_by_key(|t| t.order);
        view
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    fn snapshot(&mut self) {
        self.history.push(self.tasks.clone());
    }

    fn reassign_orders(&mut self) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.order = index;
        }
    }
}
