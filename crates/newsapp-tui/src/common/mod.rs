//! Shared building blocks for the TUI.

pub mod task;
pub mod text;
pub mod widgets;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
