//! Domain types & derivation rules for taskboard.

/// Clock abstraction for "now" and "today".
pub mod clock;
/// Due-date parsing and formatting.
pub mod due_date;
/// Filtering, ordering and counters for the display list.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task, list and update payloads.
pub mod task;
/// Search matching and highlight segmentation.
pub mod text_matcher;

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{
    ListSelector, TaskCounts, TaskFilter, count_by_list, display_order, sort_for_display,
};
pub use id::{ListId, TaskId};
pub use task::{
    DescriptionPatch, DueDatePatch, NewTask, ParsePriorityError, Priority, Task, TaskList,
    TaskPatch, TaskStatus,
};
pub use text_matcher::{Segment, TextMatcher, highlight};
