//! Error types for taskboard store operations.

use std::path::PathBuf;

use taskboard_core::TaskId;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No stored task has the requested id.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Errors that can occur while loading seed data.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Seed JSON is malformed.
    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two seeded tasks share an id.
    #[error("duplicate task id in seed data: {0}")]
    DuplicateTaskId(TaskId),

    /// A seeded task has a blank title.
    #[error("seeded task {0} has an empty title")]
    EmptyTitle(TaskId),
}
