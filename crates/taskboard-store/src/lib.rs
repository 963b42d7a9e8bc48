//! Task storage for taskboard.
//!
//! [`AsyncTaskStore`] is the boundary consumed by the application layer;
//! [`MemoryTaskStore`] is the in-memory backend with simulated latency.

use std::sync::Arc;

use anyhow::Error;
use taskboard_core::{ListId, NewTask, Priority, Task, TaskId, TaskList, TaskPatch};

pub mod error;
pub mod latency;
pub mod memory;
pub mod seed;

pub use error::{SeedError, StoreError};
pub use latency::{Latency, Operation};
pub use memory::MemoryTaskStore;
pub use seed::Seed;

/// Async task storage.
///
/// Every returned record or collection is an independent copy of the stored
/// state.
#[allow(async_fn_in_trait)]
pub trait AsyncTaskStore: Send + Sync {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error> + Send;

    /// Snapshot of every task in storage order (most recent first).
    ///
    /// # Errors
    /// Returns a store-specific error when the backend cannot be read.
    async fn get_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Fetch a single task.
    ///
    /// # Errors
    /// Returns a not-found error when no task has `id`.
    async fn get_by_id(&self, id: &TaskId) -> Result<Task, Self::Error>;

    /// Snapshot of every list.
    ///
    /// # Errors
    /// Returns a store-specific error when the backend cannot be read.
    async fn get_all_lists(&self) -> Result<Vec<TaskList>, Self::Error>;

    /// Insert a new task at the front of the collection.
    ///
    /// No validation happens here; the caller rejects blank titles.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    async fn create(&self, input: NewTask) -> Result<Task, Self::Error>;

    /// Shallow-merge `patch` onto an existing task.
    ///
    /// # Errors
    /// Returns a not-found error when no task has `id`.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, Self::Error>;

    /// Remove a task.
    ///
    /// # Errors
    /// Returns a not-found error when no task has `id`.
    async fn delete(&self, id: &TaskId) -> Result<(), Self::Error>;

    /// Tasks whose `list_id` equals `list`.
    ///
    /// # Errors
    /// Returns a store-specific error when the backend cannot be read.
    async fn get_tasks_by_list(&self, list: &ListId) -> Result<Vec<Task>, Self::Error>;

    /// Tasks with exactly `priority`.
    ///
    /// # Errors
    /// Returns a store-specific error when the backend cannot be read.
    async fn get_tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>, Self::Error>;

    /// Tasks due on the current local calendar date.
    ///
    /// # Errors
    /// Returns a store-specific error when the backend cannot be read.
    async fn get_today_tasks(&self) -> Result<Vec<Task>, Self::Error>;
}

impl<S: AsyncTaskStore> AsyncTaskStore for Arc<S> {
    type Error = S::Error;

    async fn get_all(&self) -> Result<Vec<Task>, Self::Error> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &TaskId) -> Result<Task, Self::Error> {
        (**self).get_by_id(id).await
    }

    async fn get_all_lists(&self) -> Result<Vec<TaskList>, Self::Error> {
        (**self).get_all_lists().await
    }

    async fn create(&self, input: NewTask) -> Result<Task, Self::Error> {
        (**self).create(input).await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), Self::Error> {
        (**self).delete(id).await
    }

    async fn get_tasks_by_list(&self, list: &ListId) -> Result<Vec<Task>, Self::Error> {
        (**self).get_tasks_by_list(list).await
    }

    async fn get_tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>, Self::Error> {
        (**self).get_tasks_by_priority(priority).await
    }

    async fn get_today_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        (**self).get_today_tasks().await
    }
}
