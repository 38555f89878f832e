//! Core types for the todir ecosystem.
//!
//! This crate provides shared types used by both todir-cli and todir-notify:
//! - `Todo` and related types for todo items
//! - `stride` module for repeat expansion
//! - `store` module for the .ics-file-per-todo storage directory

pub mod constants;
pub mod date_range;
pub mod error;
pub mod ics;
pub mod reminder;
pub mod repeat;
pub mod schedule;
pub mod store;
pub mod stride;
pub mod todir;
pub mod todir_config;
pub mod todo;

// Re-export the todo types at crate root for convenience
pub use error::{TodirError, TodirResult};
pub use reminder::Reminder;
pub use repeat::Repeat;
pub use stride::{ComponentDelta, DateStride, StridePoint};
pub use todo::{Priority, Todo, TodoStatus, TodoTime};
