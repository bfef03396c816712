//! Task domain model
//!
//! A task is a single to-do record: text, completion and star flags, a tag
//! set, an optional calendar due date, and a display position (`order`) over
//! the full unfiltered collection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task text (non-empty while the task exists)
    pub text: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Whether the task is marked as a favorite
    #[serde(default)]
    pub starred: bool,

    /// Tag labels (set semantics, insertion-ordered)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Optional due date (calendar date, no time component)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Display position among all tasks (0-based, dense)
    #[serde(default)]
    pub order: usize,
}

impl Task {
    /// Creates a new open task with the given ID, text, and position
    pub fn new(id: TaskId, text: impl Into<String>, order: usize) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            starred: false,
            tags: Vec::new(),
            due_date: None,
            created_at: Utc::now(),
            order,
        }
    }

    /// Adds a tag if the task doesn't already carry it. Returns true if added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    /// Removes a tag from the task. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let len_before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != len_before
    }

    /// Classifies this task's due date against `today`, if it has one
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::classify(due, today))
    }
}

/// Urgency classification of a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    /// The date is in the past
    Overdue,
    /// The date is today or within the next two days
    DueSoon,
    /// The date is further out
    Normal,
}

impl DueStatus {
    /// Classifies a due date against a reference day (both time-free)
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        let days = (due - today).num_days();
        if days < 0 {
            DueStatus::Overdue
        } else if days <= 2 {
            DueStatus::DueSoon
        } else {
            DueStatus::Normal
        }
    }

    /// Returns a display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "overdue",
            DueStatus::DueSoon => "due-soon",
            DueStatus::Normal => "normal",
        }
    }
}

/// Which tasks a projection shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
    /// Starred tasks
    Favorites,
}

impl Filter {
    /// Returns true if the task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
            Filter::Favorites => task.starred,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
            Filter::Favorites => "favorites",
        }
    }
}

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a persisted theme string, falling back to light on anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}
