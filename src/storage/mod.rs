//! # Storage Layer
//!
//! Persistence for the task board.
//!
//! ## Stored Entries
//!
//! | Key | Value | Contents |
//! |-----|-------|----------|
//! | `todos` | JSON array | The task collection |
//! | `theme` | `"light"` / `"dark"` | Theme preference |
//! | `known-tags` | JSON array of strings | Every tag label ever used |
//!
//! ## Backends
//!
//! - [`FileStore`] - a single JSON file; file locking (`fs2`) plus atomic
//!   temp-file-and-rename writes
//! - [`MemoryStore`] - in-memory map for tests and ephemeral use
//!
//! ## Key Types
//!
//! - [`Workspace`] - the board wired to a store, write-through on every
//!   applying mutation
//! - [`KeyValue`] - the contract backends implement
//! - [`Config`] - user configuration (store path, default filter)

mod config;
mod kv;
pub mod records;
mod workspace;

pub use config::Config;
pub use kv::{FileStore, KeyValue, MemoryStore};
pub use workspace::Workspace;
