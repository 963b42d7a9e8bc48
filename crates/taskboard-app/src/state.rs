//! Client-side mirror of the store plus the view inputs derived from it.

use std::collections::BTreeMap;

use taskboard_core::{ListId, ListSelector, Task, TaskCounts, TaskFilter, TaskId, TaskList};
use time::Date;

/// Progress of the initial fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Fetch in flight.
    Loading,
    /// Tasks and lists are mirrored.
    Ready,
    /// Fetch failed; retry is available.
    Failed {
        /// Error text shown next to the retry action.
        message: String,
    },
}

/// What to show when the display list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing exists under the selector.
    NoTasks,
    /// A search hid every task.
    NoMatches,
}

impl EmptyState {
    /// Short label for the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTasks => "no-tasks",
            Self::NoMatches => "no-matches",
        }
    }
}

/// Local copy of tasks and lists with the current selector and query.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
    lists: Vec<TaskList>,
    filter: TaskFilter,
    load: LoadState,
}

impl BoardState {
    /// Empty state opened on `selector`.
    #[must_use]
    pub fn new(selector: ListSelector) -> Self {
        Self {
            filter: TaskFilter::new(selector, String::new()),
            ..Self::default()
        }
    }

    /// Mirrored tasks in storage order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mirrored lists.
    #[must_use]
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// Look up a mirrored task.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    /// Display name for `list`, if the list exists.
    #[must_use]
    pub fn list_name(&self, list: &ListId) -> Option<&str> {
        self.lists
            .iter()
            .find(|entry| entry.id == *list)
            .map(|entry| entry.name.as_str())
    }

    /// Active selector.
    #[must_use]
    pub const fn selector(&self) -> &ListSelector {
        self.filter.selector()
    }

    /// Current search text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.filter.query()
    }

    /// Current load progress.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Change the selector, keeping the query.
    pub fn select(&mut self, selector: ListSelector) {
        let query = self.filter.query().to_owned();
        self.filter = TaskFilter::new(selector, query);
    }

    /// Change the query, keeping the selector.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let selector = self.filter.selector().clone();
        self.filter = TaskFilter::new(selector, query);
    }

    pub(crate) fn set_load_state(&mut self, load: LoadState) {
        self.load = load;
    }

    pub(crate) fn replace_all(&mut self, tasks: Vec<Task>, lists: Vec<TaskList>) {
        self.tasks = tasks;
        self.lists = lists;
        self.load = LoadState::Ready;
    }

    pub(crate) fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Swap in the store's copy of a task. Returns false when it is not mirrored.
    pub(crate) fn replace(&mut self, task: Task) -> bool {
        self.tasks
            .iter_mut()
            .find(|entry| entry.id == task.id)
            .map(|slot| *slot = task)
            .is_some()
    }

    pub(crate) fn remove(&mut self, id: &TaskId) {
        self.tasks.retain(|task| task.id != *id);
    }

    /// Filtered, sorted tasks for the current selector and query.
    #[must_use]
    pub fn display_tasks(&self, today: Date) -> Vec<Task> {
        self.filter.apply(&self.tasks, today)
    }

    /// Empty-state marker when nothing is displayed.
    ///
    /// `NoMatches` requires a non-empty query under a selector that applies
    /// search. An empty `today` view is `NoTasks` even while a query is typed,
    /// since the query played no part in emptying it.
    #[must_use]
    pub fn empty_state(&self, today: Date) -> Option<EmptyState> {
        if self.tasks.iter().any(|task| self.filter.matches(task, today)) {
            return None;
        }
        if self.query().is_empty() || !self.selector().applies_search() {
            Some(EmptyState::NoTasks)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Counters over every mirrored task, ignoring the filter.
    #[must_use]
    pub fn counts(&self, today: Date) -> TaskCounts {
        TaskCounts::collect(&self.tasks, today)
    }

    /// Tasks per list id.
    #[must_use]
    pub fn list_counts(&self) -> BTreeMap<ListId, usize> {
        taskboard_core::count_by_list(&self.tasks)
    }
}
