//! Derivation rules turning the full task collection into the display list.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::{convert::Infallible, fmt, str::FromStr};

use time::Date;

use crate::id::ListId;
use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Which subset of tasks the user is looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ListSelector {
    /// Every task.
    #[default]
    All,
    /// Tasks due on the current calendar date. Search is ignored.
    Today,
    /// Tasks assigned to one list.
    List(ListId),
}

impl ListSelector {
    /// Token for the "all" selector.
    pub const ALL: &'static str = "all";
    /// Token for the "today" selector.
    pub const TODAY: &'static str = "today";

    /// Returns true when search text is applied under this selector.
    #[must_use]
    pub const fn applies_search(&self) -> bool {
        !matches!(self, Self::Today)
    }
}

impl fmt::Display for ListSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Today => f.write_str(Self::TODAY),
            Self::List(id) => id.fmt(f),
        }
    }
}

impl FromStr for ListSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed {
            Self::ALL => Self::All,
            Self::TODAY => Self::Today,
            other => Self::List(ListId::from(other)),
        })
    }
}

impl From<ListId> for ListSelector {
    fn from(value: ListId) -> Self {
        Self::List(value)
    }
}

/// Selector plus free-text search.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    selector: ListSelector,
    query: String,
    matcher: Option<TextMatcher>,
}

impl TaskFilter {
    /// Build a filter for `selector` and `query`.
    #[must_use]
    pub fn new(selector: ListSelector, query: impl Into<String>) -> Self {
        let query = query.into();
        let matcher = TextMatcher::new(&query);
        Self {
            selector,
            query,
            matcher,
        }
    }

    /// Active selector.
    #[must_use]
    pub const fn selector(&self) -> &ListSelector {
        &self.selector
    }

    /// Raw search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Determine whether `task` belongs to the display set.
    #[must_use]
    pub fn matches(&self, task: &Task, today: Date) -> bool {
        match &self.selector {
            ListSelector::Today => task.is_due_on(today),
            ListSelector::All => self.matches_text(task),
            ListSelector::List(list) => task.list_id == *list && self.matches_text(task),
        }
    }

    fn matches_text(&self, task: &Task) -> bool {
        self.matcher
            .as_ref()
            .is_none_or(|matcher| matcher.matches(task))
    }

    /// Filter and sort `tasks` into display order.
    #[must_use]
    pub fn apply(&self, tasks: &[Task], today: Date) -> Vec<Task> {
        let mut visible: Vec<Task> = tasks
            .iter()
            .filter(|task| self.matches(task, today))
            .cloned()
            .collect();
        sort_for_display(&mut visible);
        visible
    }
}

/// Composite display order.
///
/// Incomplete before completed, then priority rank, then tasks with a due date
/// (earliest first) before tasks without one, then newest `created_at` first.
#[must_use]
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort into [`display_order`].
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(display_order);
}

/// Aggregate counters shown next to the list selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Every task.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Tasks due today (completed or not).
    pub due_today: usize,
}

impl TaskCounts {
    /// Count `tasks` relative to `today`.
    #[must_use]
    pub fn collect(tasks: &[Task], today: Date) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            counts.total += 1;
            if task.completed {
                counts.completed += 1;
            }
            if task.is_due_on(today) {
                counts.due_today += 1;
            }
            counts
        })
    }
}

/// Number of tasks per list id, orphaned ids included.
#[must_use]
pub fn count_by_list(tasks: &[Task]) -> BTreeMap<ListId, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.list_id.clone()).or_insert(0) += 1;
    }
    counts
}
