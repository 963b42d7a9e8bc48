//! Orchestration of store calls, local mirror updates and notices.

use std::collections::BTreeMap;

use anyhow::Error;
use taskboard_core::{Clock, ListId, ListSelector, NewTask, Task, TaskCounts, TaskId, TaskPatch};
use taskboard_store::{AsyncTaskStore, StoreError};
use thiserror::Error as ThisError;
use time::Date;
use tracing::{debug, info, warn};

use crate::notice::Notice;
use crate::state::{BoardState, EmptyState, LoadState};

const EMPTY_TITLE: &str = "task title must not be empty";

/// Errors surfaced by [`TaskBoard`] operations.
#[derive(Debug, ThisError)]
pub enum BoardError {
    /// Input rejected before reaching the store.
    #[error("validation rejected: {0}")]
    ValidationRejected(&'static str),
    /// Target task does not exist.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Backing store returned an error.
    #[error("store error: {0}")]
    Store(#[from] Error),
}

impl BoardError {
    fn from_store<E: Into<Error>>(err: E) -> Self {
        let err: Error = err.into();
        if let Some(StoreError::TaskNotFound(id)) = err.downcast_ref::<StoreError>() {
            return Self::NotFound(id.clone());
        }
        Self::Store(err)
    }
}

/// Task board session: a store, the local mirror and pending notices.
///
/// Every mutation awaits the store first and only touches the mirror on
/// success, so a failed call leaves local state unchanged.
pub struct TaskBoard<S, C> {
    store: S,
    clock: C,
    state: BoardState,
    notices: Vec<Notice>,
}

impl<S: AsyncTaskStore, C: Clock> TaskBoard<S, C> {
    /// Create a board opened on `selector`. Nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(store: S, clock: C, selector: ListSelector) -> Self {
        Self {
            store,
            clock,
            state: BoardState::new(selector),
            notices: Vec::new(),
        }
    }

    /// Backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Local mirror.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Current local calendar date.
    #[must_use]
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Fetch tasks and lists concurrently and replace the mirror.
    ///
    /// # Errors
    /// Returns [`BoardError::Store`] when either fetch fails; the load state
    /// becomes [`LoadState::Failed`] and a failure notice is queued.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        self.state.set_load_state(LoadState::Loading);
        let (tasks, lists) = tokio::join!(self.store.get_all(), self.store.get_all_lists());
        let fetched: Result<_, Error> = match (tasks, lists) {
            (Ok(tasks), Ok(lists)) => Ok((tasks, lists)),
            (Err(err), _) | (_, Err(err)) => Err(err.into()),
        };

        match fetched {
            Ok((tasks, lists)) => {
                info!(tasks = tasks.len(), lists = lists.len(), "board loaded");
                self.state.replace_all(tasks, lists);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load board");
                self.state.set_load_state(LoadState::Failed {
                    message: err.to_string(),
                });
                self.notices.push(Notice::LOAD_FAILED);
                Err(BoardError::Store(err))
            }
        }
    }

    /// Repeat the initial fetch after a failure.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub async fn retry(&mut self) -> Result<(), BoardError> {
        debug!(state = ?self.state.load_state(), "retrying load");
        self.load().await
    }

    /// Create a task and prepend the stored copy to the mirror.
    ///
    /// # Errors
    /// Returns [`BoardError::ValidationRejected`] without calling the store when the
    /// title is blank, or the store failure otherwise.
    pub async fn create(&mut self, input: NewTask) -> Result<Task, BoardError> {
        if input.has_blank_title() {
            self.notices.push(Notice::CREATION_FAILED);
            return Err(BoardError::ValidationRejected(EMPTY_TITLE));
        }

        match self.store.create(input.normalized()).await {
            Ok(task) => {
                info!(task = %task.id, list = %task.list_id, "task created");
                self.state.prepend(task.clone());
                self.notices.push(Notice::TASK_CREATED);
                Ok(task)
            }
            Err(err) => {
                let err = BoardError::from_store(err);
                warn!(error = %err, "task creation failed");
                self.notices.push(Notice::CREATION_FAILED);
                Err(err)
            }
        }
    }

    /// Flip the completion flag of a mirrored task.
    ///
    /// The whole task is sent with only `completed` changed.
    ///
    /// # Errors
    /// Returns [`BoardError::NotFound`] when the task is not mirrored locally,
    /// or the store failure otherwise.
    pub async fn toggle_complete(&mut self, id: &TaskId) -> Result<Task, BoardError> {
        let Some(mut desired) = self.state.task(id).cloned() else {
            warn!(task = %id, "toggle on unknown task");
            self.notices.push(Notice::UPDATE_FAILED);
            return Err(BoardError::NotFound(id.clone()));
        };
        desired.completed = !desired.completed;
        let patch = TaskPatch::full(&desired);

        match self.store.update(id, &patch).await {
            Ok(task) => {
                info!(task = %task.id, completed = task.completed, "task toggled");
                self.notices.push(if task.completed {
                    Notice::TASK_COMPLETED
                } else {
                    Notice::TASK_RESTORED
                });
                self.state.replace(task.clone());
                Ok(task)
            }
            Err(err) => {
                let err = BoardError::from_store(err);
                warn!(task = %id, error = %err, "task toggle failed");
                self.notices.push(Notice::UPDATE_FAILED);
                Err(err)
            }
        }
    }

    /// Apply field edits to a task.
    ///
    /// # Errors
    /// Returns [`BoardError::ValidationRejected`] without calling the store when the
    /// patch blanks the title, or the store failure otherwise.
    pub async fn edit(&mut self, id: &TaskId, patch: &TaskPatch) -> Result<Task, BoardError> {
        if patch.blanks_title() {
            self.notices.push(Notice::UPDATE_FAILED);
            return Err(BoardError::ValidationRejected(EMPTY_TITLE));
        }

        match self.store.update(id, patch).await {
            Ok(task) => {
                info!(task = %task.id, "task edited");
                if !self.state.replace(task.clone()) {
                    debug!(task = %task.id, "edited task was not mirrored");
                }
                self.notices.push(Notice::TASK_UPDATED);
                Ok(task)
            }
            Err(err) => {
                let err = BoardError::from_store(err);
                warn!(task = %id, error = %err, "task edit failed");
                self.notices.push(Notice::UPDATE_FAILED);
                Err(err)
            }
        }
    }

    /// Delete a task and drop it from the mirror.
    ///
    /// # Errors
    /// Returns the store failure; the mirror is left untouched.
    pub async fn delete(&mut self, id: &TaskId) -> Result<(), BoardError> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!(task = %id, "task deleted");
                self.state.remove(id);
                self.notices.push(Notice::TASK_ELIMINATED);
                Ok(())
            }
            Err(err) => {
                let err = BoardError::from_store(err);
                warn!(task = %id, error = %err, "task deletion failed");
                self.notices.push(Notice::DELETION_FAILED);
                Err(err)
            }
        }
    }

    /// Change the active selector.
    pub fn select(&mut self, selector: ListSelector) {
        debug!(selector = %selector, "selector changed");
        self.state.select(selector);
    }

    /// Change the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    /// Filtered and sorted tasks for today.
    #[must_use]
    pub fn display_tasks(&self) -> Vec<Task> {
        self.state.display_tasks(self.today())
    }

    /// Empty-state marker for today.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.state.empty_state(self.today())
    }

    /// Counters for today.
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        self.state.counts(self.today())
    }

    /// Tasks per list id.
    #[must_use]
    pub fn list_counts(&self) -> BTreeMap<ListId, usize> {
        self.state.list_counts()
    }

    /// Take every queued notice, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
