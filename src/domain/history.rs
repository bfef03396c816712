//! Undo history
//!
//! A bounded stack of full task-collection snapshots. Every mutating board
//! operation pushes a deep copy of the collection before applying its change;
//! undo pops the most recent snapshot. When the stack is full the oldest
//! snapshot is discarded. There is no redo.

use std::collections::VecDeque;

use super::task::Task;

/// Maximum number of snapshots retained
pub const HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO-evicting stack of task-collection snapshots
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Vec<Task>>,
}

impl History {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot, discarding the oldest one at capacity
    pub fn push(&mut self, snapshot: Vec<Task>) {
        if self.snapshots.len() == HISTORY_CAPACITY {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pops the most recent snapshot, or None when exhausted
    pub fn pop(&mut self) -> Option<Vec<Task>> {
        self.snapshots.pop_back()
    }

    /// Returns the number of snapshots available
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if no snapshots are available
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::TaskId;
    use chrono::Utc;

    fn snapshot_of(texts: &[&str]) -> Vec<Task> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Task::new(TaskId::new(text, Utc::now()), *text, i))
            .collect()
    }

    #[test]
    fn pop_returns_most_recent_first() {
        let mut history = History::new();
        history.push(snapshot_of(&["a"]));
        history.push(snapshot_of(&["a", "b"]));

        assert_eq!(history.pop().unwrap().len(), 2);
        assert_eq!(history.pop().unwrap().len(), 1);
        assert!(history.pop().is_none());
    }

    #[test]
    fn empty_history_pops_none() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut history = History::new();
        for i in 0..HISTORY_CAPACITY + 3 {
            history.push(snapshot_of(&vec!["x"; i + 1]));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);

        // The three oldest snapshots (sizes 1..=3) were discarded; the
        // bottom of the stack is now the size-4 snapshot.
        let mut last = None;
        while let Some(snap) = history.pop() {
            last = Some(snap);
        }
        assert_eq!(last.unwrap().len(), 4);
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let mut history = History::new();
        let mut tasks = snapshot_of(&["a"]);
        history.push(tasks.clone());

        tasks[0].completed = true;

        let restored = history.pop().unwrap();
        assert!(!restored[0].completed);
    }
}
