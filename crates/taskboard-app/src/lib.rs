//! Application layer for taskboard.
//!
//! Wraps an [`taskboard_store::AsyncTaskStore`] with a local mirror, the
//! derived display list, transient notices and project configuration.

pub mod board;
pub mod config;
pub mod notice;
pub mod state;

pub use board::{BoardError, TaskBoard};
pub use config::{BoardConfig, ProjectConfig, SeedConfig};
pub use notice::{Notice, NoticeLevel};
pub use state::{BoardState, EmptyState, LoadState};
