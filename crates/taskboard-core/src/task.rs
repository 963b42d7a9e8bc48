use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use time::{Date, OffsetDateTime};

use crate::id::{ListId, TaskId};

/// Task urgency. Declaration order is display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Most urgent.
    High,
    /// Default urgency.
    #[default]
    Medium,
    /// Least urgent.
    Low,
}

impl Priority {
    /// Every priority in rank order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Sort rank: high(0) < medium(1) < low(2).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority token is not `high`, `medium` or `low`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid priority `{token}`; expected high|medium|low")]
pub struct ParsePriorityError {
    token: String,
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            _ => Err(ParsePriorityError { token: s.to_owned() }),
        }
    }
}

/// A single actionable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Display title, never blank once created.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Optional deadline (calendar date only).
    #[serde(default, with = "crate::due_date")]
    pub due_date: Option<Date>,
    /// Owning list, or the `default` sentinel.
    #[serde(default)]
    pub list_id: ListId,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp; immutable.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Materialize a new task from creation input.
    #[must_use]
    pub fn create(input: NewTask, id: TaskId, created_at: OffsetDateTime) -> Self {
        let NewTask {
            title,
            description,
            priority,
            due_date,
            list_id,
        } = input;
        Self {
            id,
            title,
            description,
            priority,
            due_date,
            list_id,
            completed: false,
            created_at,
        }
    }

    /// Returns true when the task is due on `today`.
    #[must_use]
    pub fn is_due_on(&self, today: Date) -> bool {
        self.due_date == Some(today)
    }

    /// Classify the task relative to `today`.
    #[must_use]
    pub fn status(&self, today: Date) -> TaskStatus {
        if self.completed {
            return TaskStatus::Completed;
        }
        match self.due_date {
            Some(due) if due < today => TaskStatus::Overdue,
            Some(due) if due == today => TaskStatus::DueToday,
            _ => TaskStatus::Normal,
        }
    }

    /// Human-readable due label (`DUE TODAY` or `Jan 05, 2024`).
    #[must_use]
    pub fn due_label(&self, today: Date) -> Option<String> {
        let due = self.due_date?;
        if due == today {
            return Some("DUE TODAY".to_owned());
        }
        Some(crate::due_date::display(due))
    }
}

/// Display classification of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Task is done.
    Completed,
    /// Due date has passed.
    Overdue,
    /// Due today.
    DueToday,
    /// Anything else.
    Normal,
}

impl TaskStatus {
    /// Stable lowercase token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::DueToday => "due-today",
            Self::Normal => "normal",
        }
    }
}

/// A named grouping that tasks may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique identifier.
    pub id: ListId,
    /// Display name.
    pub name: String,
}

/// Input accepted by task creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Requested title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority (defaults to medium).
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date.
    #[serde(default, with = "crate::due_date")]
    pub due_date: Option<Date>,
    /// Target list (defaults to `default`).
    #[serde(default)]
    pub list_id: ListId,
}

impl NewTask {
    /// Start a creation request with form defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set a due date.
    #[must_use]
    pub fn with_due_date(mut self, due: Date) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Assign to a list.
    #[must_use]
    pub fn with_list(mut self, list: impl Into<ListId>) -> Self {
        self.list_id = list.into();
        self
    }

    /// Returns true when the title is empty after trimming.
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Drop blank optional text so it is stored as absent.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self
            .description
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            self.description = None;
        }
        self
    }
}

/// Patch for the description body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionPatch {
    /// Overwrite with new text.
    Set {
        /// Replacement body.
        description: String,
    },
    /// Remove the description.
    Clear,
}

/// Patch for the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDatePatch {
    /// Overwrite with a new date.
    Set {
        /// Replacement due date.
        date: Date,
    },
    /// Remove the deadline.
    Clear,
}

/// Partial update over the mutable task fields.
///
/// `id` and `created_at` have no slot here, so an update can never touch them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// Description change.
    pub description: Option<DescriptionPatch>,
    /// New priority.
    pub priority: Option<Priority>,
    /// Due date change.
    pub due_date: Option<DueDatePatch>,
    /// New list assignment.
    pub list_id: Option<ListId>,
    /// New completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that overwrites every mutable field with the values of `task`.
    #[must_use]
    pub fn full(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone().map_or(
                DescriptionPatch::Clear,
                |description| DescriptionPatch::Set { description },
            )),
            priority: Some(task.priority),
            due_date: Some(
                task.due_date
                    .map_or(DueDatePatch::Clear, |date| DueDatePatch::Set { date }),
            ),
            list_id: Some(task.list_id.clone()),
            completed: Some(task.completed),
        }
    }

    /// Returns true when applying the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.list_id.is_none()
            && self.completed.is_none()
    }

    /// Returns true when the patch would leave the task with a blank title.
    #[must_use]
    pub fn blanks_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| title.trim().is_empty())
    }

    /// Shallow-merge the supplied fields onto `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        match &self.description {
            Some(DescriptionPatch::Set { description }) => {
                task.description = Some(description.clone());
            }
            Some(DescriptionPatch::Clear) => task.description = None,
            None => {}
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        match self.due_date {
            Some(DueDatePatch::Set { date }) => task.due_date = Some(date),
            Some(DueDatePatch::Clear) => task.due_date = None,
            None => {}
        }
        if let Some(list_id) = &self.list_id {
            task.list_id.clone_from(list_id);
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample() -> Task {
        Task::create(
            NewTask::new("Write report")
                .with_description("quarterly")
                .with_priority(Priority::High)
                .with_due_date(date!(2024 - 01 - 10))
                .with_list("work"),
            TaskId::from("t-1"),
            datetime!(2024-01-01 09:00 UTC),
        )
    }

    #[test]
    fn create_starts_incomplete_with_given_fields() {
        let task = sample();
        assert!(!task.completed);
        assert_eq!(task.id.as_str(), "t-1");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.list_id, ListId::from("work"));
        assert_eq!(task.created_at, datetime!(2024-01-01 09:00 UTC));
    }

    #[test]
    fn new_task_defaults_match_creation_form() {
        let input = NewTask::new("x");
        assert_eq!(input.priority, Priority::Medium);
        assert!(input.list_id.is_unassigned());
        assert!(input.due_date.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn blank_title_detection_trims_whitespace() {
        assert!(NewTask::new("   \t").has_blank_title());
        assert!(NewTask::new("").has_blank_title());
        assert!(!NewTask::new(" a ").has_blank_title());
    }

    #[test]
    fn normalized_drops_blank_description() {
        let input = NewTask::new("x").with_description("  ").normalized();
        assert!(input.description.is_none());
        let input = NewTask::new("x").with_description("body").normalized();
        assert_eq!(input.description.as_deref(), Some("body"));
    }

    #[test]
    fn priority_parses_tokens_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" med ".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("l".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn status_classifies_against_today() {
        let today = date!(2024 - 01 - 10);
        let mut task = sample();
        assert_eq!(task.status(today), TaskStatus::DueToday);
        assert_eq!(task.status(date!(2024 - 01 - 11)), TaskStatus::Overdue);
        assert_eq!(task.status(date!(2024 - 01 - 09)), TaskStatus::Normal);
        task.completed = true;
        assert_eq!(task.status(date!(2024 - 01 - 11)), TaskStatus::Completed);
        task.completed = false;
        task.due_date = None;
        assert_eq!(task.status(today), TaskStatus::Normal);
    }

    #[test]
    fn due_label_uses_today_marker() {
        let task = sample();
        assert_eq!(task.due_label(date!(2024 - 01 - 10)).as_deref(), Some("DUE TODAY"));
        assert_eq!(
            task.due_label(date!(2024 - 01 - 02)).as_deref(),
            Some("Jan 10, 2024")
        );
    }

    #[test]
    fn patch_preserves_unspecified_fields() {
        let mut task = sample();
        let patch = TaskPatch {
            completed: Some(true),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);
        assert!(task.completed);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description.as_deref(), Some("quarterly"));
        assert_eq!(task.due_date, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn patch_clears_optional_fields() {
        let mut task = sample();
        let patch = TaskPatch {
            description: Some(DescriptionPatch::Clear),
            due_date: Some(DueDatePatch::Clear),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn full_patch_reproduces_record() {
        let source = sample();
        let mut target = Task::create(
            NewTask::new("other"),
            source.id.clone(),
            source.created_at,
        );
        TaskPatch::full(&source).apply(&mut target);
        assert_eq!(target, source);
    }

    #[test]
    fn blanks_title_detects_whitespace_titles() {
        let patch = TaskPatch {
            title: Some("  ".into()),
            ..TaskPatch::default()
        };
        assert!(patch.blanks_title());
        assert!(!TaskPatch::default().blanks_title());
    }
}
