//! Board behaviour against a store that can be told to fail.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use taskboard_app::{BoardError, LoadState, Notice, TaskBoard};
use taskboard_core::{
    FixedClock, ListId, ListSelector, NewTask, Priority, Task, TaskId, TaskList, TaskPatch,
};
use taskboard_store::{AsyncTaskStore, Latency, MemoryTaskStore, Seed};
use time::macros::datetime;
use tokio::time::Instant;

/// Delegates to an in-memory store unless `failing` is set.
struct FlakyStore {
    inner: MemoryTaskStore<Arc<FixedClock>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyStore {
    fn new(latency: Latency) -> Self {
        let clock = Arc::new(FixedClock::new(datetime!(2024-01-15 09:00 UTC)));
        Self {
            inner: MemoryTaskStore::new(Seed::builtin().expect("builtin seed"))
                .with_latency(latency)
                .with_clock(clock),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn gate(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("backend offline"));
        }
        Ok(())
    }
}

impl AsyncTaskStore for FlakyStore {
    type Error = anyhow::Error;

    async fn get_all(&self) -> Result<Vec<Task>, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_all().await?)
    }

    async fn get_by_id(&self, id: &TaskId) -> Result<Task, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_by_id(id).await?)
    }

    async fn get_all_lists(&self) -> Result<Vec<TaskList>, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_all_lists().await?)
    }

    async fn create(&self, input: NewTask) -> Result<Task, Self::Error> {
        self.gate()?;
        Ok(self.inner.create(input).await?)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        self.gate()?;
        Ok(self.inner.update(id, patch).await?)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), Self::Error> {
        self.gate()?;
        Ok(self.inner.delete(id).await?)
    }

    async fn get_tasks_by_list(&self, list: &ListId) -> Result<Vec<Task>, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_tasks_by_list(list).await?)
    }

    async fn get_tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_tasks_by_priority(priority).await?)
    }

    async fn get_today_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        self.gate()?;
        Ok(self.inner.get_today_tasks().await?)
    }
}

fn board(latency: Latency) -> (TaskBoard<Arc<FlakyStore>, FixedClock>, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::new(latency));
    let clock = FixedClock::new(datetime!(2024-01-15 09:00 UTC));
    (
        TaskBoard::new(Arc::clone(&store), clock, ListSelector::All),
        store,
    )
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let (mut board, store) = board(Latency::none());
    store.fail(true);

    let result = board.load().await;
    assert!(matches!(result, Err(BoardError::Store(_))));
    assert!(matches!(
        board.state().load_state(),
        LoadState::Failed { message } if message.contains("backend offline")
    ));
    assert_eq!(board.take_notices(), vec![Notice::LOAD_FAILED]);
    assert!(board.display_tasks().is_empty());

    store.fail(false);
    board.retry().await.expect("retry");
    assert_eq!(board.state().load_state(), &LoadState::Ready);
    assert_eq!(board.state().tasks().len(), 6);
    assert!(board.take_notices().is_empty());
}

#[tokio::test]
async fn failed_mutations_leave_the_mirror_untouched() {
    let (mut board, store) = board(Latency::none());
    board.load().await.expect("load");
    let before = board.state().tasks().to_vec();
    store.fail(true);

    assert!(board.create(NewTask::new("offline")).await.is_err());
    assert!(board.toggle_complete(&TaskId::from("1")).await.is_err());
    assert!(board.delete(&TaskId::from("2")).await.is_err());

    assert_eq!(board.state().tasks(), before.as_slice());
    assert_eq!(
        board.take_notices(),
        vec![
            Notice::CREATION_FAILED,
            Notice::UPDATE_FAILED,
            Notice::DELETION_FAILED
        ]
    );
}

#[tokio::test]
async fn validation_failures_make_no_store_calls() {
    let (mut board, store) = board(Latency::none());
    board.load().await.expect("load");
    let calls = store.calls();

    let blank = TaskPatch {
        title: Some(String::new()),
        ..TaskPatch::default()
    };
    assert!(matches!(
        board.create(NewTask::new("")).await,
        Err(BoardError::ValidationRejected(_))
    ));
    assert!(matches!(
        board.edit(&TaskId::from("1"), &blank).await,
        Err(BoardError::ValidationRejected(_))
    ));
    assert!(matches!(
        board.toggle_complete(&TaskId::from("nope")).await,
        Err(BoardError::NotFound(_))
    ));
    assert_eq!(store.calls(), calls);
}

#[tokio::test]
async fn store_not_found_maps_through_anyhow() {
    let (mut board, _store) = board(Latency::none());
    board.load().await.expect("load");
    let result = board.delete(&TaskId::from("missing")).await;
    assert!(matches!(result, Err(BoardError::NotFound(id)) if id.as_str() == "missing"));
}

#[tokio::test(start_paused = true)]
async fn load_fetches_tasks_and_lists_concurrently() {
    let (mut board, _store) = board(Latency::default());
    let started = Instant::now();
    board.load().await.expect("load");
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(300) && elapsed < Duration::from_millis(550),
        "load waited {elapsed:?}"
    );
}

#[tokio::test]
async fn completing_a_task_moves_it_below_open_work() {
    let (mut board, _store) = board(Latency::none());
    board.load().await.expect("load");
    board.select(ListSelector::List(ListId::from("work")));

    let first = board.display_tasks()[0].id.clone();
    board.toggle_complete(&first).await.expect("toggle");
    let order = board.display_tasks();
    assert_eq!(order.last().map(|task| &task.id), Some(&first));
    assert!(order.last().is_some_and(|task| task.completed));
}
