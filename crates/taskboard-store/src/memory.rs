//! In-memory task store with simulated latency.

use taskboard_core::{
    Clock, ListId, NewTask, Priority, SystemClock, Task, TaskId, TaskList, TaskPatch,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::AsyncTaskStore;
use crate::error::StoreError;
use crate::latency::{Latency, Operation};
use crate::seed::Seed;

/// Authoritative in-memory collection of tasks and lists.
///
/// Every operation sleeps for its configured latency before touching state;
/// the lock is only held for the in-memory work itself.
pub struct MemoryTaskStore<C = SystemClock> {
    state: Mutex<StoreState>,
    latency: Latency,
    clock: C,
}

struct StoreState {
    tasks: Vec<Task>,
    lists: Vec<TaskList>,
}

impl StoreState {
    fn position(&self, id: &TaskId) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|task| task.id == *id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.tasks.iter().all(|task| task.id != id) {
                return id;
            }
        }
    }
}

impl MemoryTaskStore<SystemClock> {
    /// Create a store from seed data using the wall clock and default latency.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            state: Mutex::new(StoreState {
                tasks: seed.tasks,
                lists: seed.lists,
            }),
            latency: Latency::default(),
            clock: SystemClock::local(),
        }
    }
}

impl<C: Clock> MemoryTaskStore<C> {
    /// Replace the latency table.
    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the clock used for `created_at` stamps and "today".
    #[must_use]
    pub fn with_clock<K: Clock>(self, clock: K) -> MemoryTaskStore<K> {
        MemoryTaskStore {
            state: self.state,
            latency: self.latency,
            clock,
        }
    }

    async fn pause(&self, op: Operation) {
        let delay = self.latency.duration(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    async fn filtered(&self, op: Operation, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.pause(op).await;
        let state = self.state.lock().await;
        let tasks: Vec<Task> = state.tasks.iter().filter(|task| keep(task)).cloned().collect();
        debug!(op = op.as_str(), count = tasks.len(), "filtered tasks");
        tasks
    }
}

impl<C: Clock> AsyncTaskStore for MemoryTaskStore<C> {
    type Error = StoreError;

    async fn get_all(&self) -> Result<Vec<Task>, Self::Error> {
        self.pause(Operation::GetAll).await;
        let state = self.state.lock().await;
        debug!(count = state.tasks.len(), "loaded all tasks");
        Ok(state.tasks.clone())
    }

    async fn get_by_id(&self, id: &TaskId) -> Result<Task, Self::Error> {
        self.pause(Operation::GetById).await;
        let state = self.state.lock().await;
        let idx = state.position(id)?;
        Ok(state.tasks[idx].clone())
    }

    async fn get_all_lists(&self) -> Result<Vec<TaskList>, Self::Error> {
        self.pause(Operation::GetAllLists).await;
        let state = self.state.lock().await;
        Ok(state.lists.clone())
    }

    async fn create(&self, input: NewTask) -> Result<Task, Self::Error> {
        self.pause(Operation::Create).await;
        let mut state = self.state.lock().await;
        let task = Task::create(input, state.fresh_id(), self.clock.now());
        state.tasks.insert(0, task.clone());
        drop(state);
        debug!(task = %task.id, list = %task.list_id, "task created");
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        self.pause(Operation::Update).await;
        let mut state = self.state.lock().await;
        let idx = state.position(id)?;
        let task = &mut state.tasks[idx];
        patch.apply(task);
        let updated = task.clone();
        drop(state);
        debug!(task = %id, completed = updated.completed, "task updated");
        Ok(updated)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), Self::Error> {
        self.pause(Operation::Delete).await;
        let mut state = self.state.lock().await;
        let idx = state.position(id)?;
        state.tasks.remove(idx);
        drop(state);
        debug!(task = %id, "task deleted");
        Ok(())
    }

    async fn get_tasks_by_list(&self, list: &ListId) -> Result<Vec<Task>, Self::Error> {
        Ok(self
            .filtered(Operation::GetByList, |task| task.list_id == *list)
            .await)
    }

    async fn get_tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>, Self::Error> {
        Ok(self
            .filtered(Operation::GetByPriority, |task| task.priority == priority)
            .await)
    }

    async fn get_today_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        let today = self.clock.today();
        Ok(self
            .filtered(Operation::GetToday, |task| task.is_due_on(today))
            .await)
    }
}
