//! Tick - a local-first to-do list for the terminal
//!
//! Tick keeps an ordered list of tasks with completion and star flags, tags,
//! and due dates. Every mutation is undoable (bounded history) and written
//! through to a local key-value store, so the list survives between runs.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Board, DueStatus, Filter, Task, TaskId, Theme};
pub use storage::{FileStore, KeyValue, MemoryStore, Workspace};
