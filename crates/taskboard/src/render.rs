//! Plain-text rendering of board views.

use std::fmt::Write as _;

use taskboard_app::{BoardState, EmptyState, Notice};
use taskboard_core::{ListSelector, Task, TaskCounts, TaskStatus, highlight};
use time::Date;

/// Shortcut table of the graphical board and the shell verb each maps to.
pub const KEYS: &[(&str, &str, &str)] = &[
    ("Ctrl+K", "focus search", "search <text>"),
    ("Ctrl+N", "new task", "add <title>"),
    ("Ctrl+/", "shortcuts help", "keys"),
    ("Esc", "dismiss", "search (no text clears it)"),
];

const fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "[x]",
        TaskStatus::Overdue => "[!]",
        TaskStatus::DueToday => "[*]",
        TaskStatus::Normal => "[ ]",
    }
}

/// Wrap every query hit in `text` with asterisks.
pub fn emphasize(text: &str, query: &str) -> String {
    highlight(text, query)
        .into_iter()
        .fold(String::with_capacity(text.len()), |mut out, segment| {
            if segment.matched {
                out.push('*');
                out.push_str(segment.text);
                out.push('*');
            } else {
                out.push_str(segment.text);
            }
            out
        })
}

/// One line per task: marker, id, title, priority, due label and list.
pub fn task_row(task: &Task, state: &BoardState, today: Date) -> String {
    let mut row = format!(
        "{} {}  {}  {}",
        status_marker(task.status(today)),
        task.id,
        emphasize(&task.title, state.query()),
        task.priority.as_str().to_uppercase(),
    );
    if let Some(label) = task.due_label(today) {
        let _ = write!(row, "  {label}");
    }
    if !task.list_id.is_unassigned() {
        let list = state
            .list_name(&task.list_id)
            .unwrap_or_else(|| task.list_id.as_str());
        let _ = write!(row, "  @{list}");
    }
    row
}

/// Multi-line view of a single task.
pub fn task_detail(task: &Task, state: &BoardState, today: Date) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", emphasize(&task.title, state.query()));
    let _ = writeln!(out, "  id:        {}", task.id);
    let _ = writeln!(out, "  status:    {}", task.status(today).as_str());
    let _ = writeln!(out, "  priority:  {}", task.priority);
    if let Some(label) = task.due_label(today) {
        let _ = writeln!(out, "  due:       {label}");
    }
    let list = state
        .list_name(&task.list_id)
        .unwrap_or_else(|| task.list_id.as_str());
    let _ = writeln!(out, "  list:      {list}");
    if let Some(description) = &task.description {
        let _ = writeln!(out, "  notes:     {}", emphasize(description, state.query()));
    }
    out
}

/// Display list for the current selector, or the empty-state text.
pub fn task_table(state: &BoardState, today: Date) -> String {
    match state.empty_state(today) {
        Some(EmptyState::NoTasks) => "No tasks here yet. Use `add` to create one.\n".to_owned(),
        Some(EmptyState::NoMatches) => format!("No tasks match \"{}\".\n", state.query()),
        None => state
            .display_tasks(today)
            .iter()
            .fold(String::new(), |mut out, task| {
                let _ = writeln!(out, "{}", task_row(task, state, today));
                out
            }),
    }
}

/// Selector entries with their task counts; the active one is starred.
pub fn list_table(state: &BoardState, today: Date) -> String {
    let counts = state.counts(today);
    let per_list = state.list_counts();
    let active = state.selector();
    let mark = |selector: &ListSelector| if selector == active { '*' } else { ' ' };

    let mut out = String::new();
    let _ = writeln!(out, "{} all       ({})", mark(&ListSelector::All), counts.total);
    let _ = writeln!(
        out,
        "{} today     ({})",
        mark(&ListSelector::Today),
        counts.due_today
    );
    for list in state.lists() {
        let selector = ListSelector::List(list.id.clone());
        let count = per_list.get(&list.id).copied().unwrap_or_default();
        let _ = writeln!(out, "{} {}  {} ({count})", mark(&selector), list.id, list.name);
    }
    out
}

/// Board counters.
pub fn stats(counts: TaskCounts) -> String {
    format!(
        "total: {}  completed: {}  due today: {}\n",
        counts.total, counts.completed, counts.due_today
    )
}

/// Shortcut table.
pub fn keys() -> String {
    KEYS.iter()
        .fold(String::new(), |mut out, (key, action, verb)| {
            let _ = writeln!(out, "{key:<8}{action:<16}{verb}");
            out
        })
}

/// Notice line with a severity prefix.
pub fn notice(notice: &Notice) -> String {
    let prefix = if notice.is_failure() { "error" } else { "ok" };
    format!("[{prefix}] {notice}")
}
