use std::time::Duration;

use serde::Deserialize;

/// Store operation, used to look up its simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `get_all`
    GetAll,
    /// `get_by_id`
    GetById,
    /// `get_all_lists`
    GetAllLists,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// `get_tasks_by_list`
    GetByList,
    /// `get_tasks_by_priority`
    GetByPriority,
    /// `get_today_tasks`
    GetToday,
}

impl Operation {
    /// Stable name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetAll => "get_all",
            Self::GetById => "get_by_id",
            Self::GetAllLists => "get_all_lists",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetByList => "get_tasks_by_list",
            Self::GetByPriority => "get_tasks_by_priority",
            Self::GetToday => "get_today_tasks",
        }
    }
}

/// Simulated per-operation latency, in milliseconds.
///
/// Deserialized from the `[latency]` table of the project configuration;
/// missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Latency {
    /// Master switch; when false every operation resolves immediately.
    pub enabled: bool,
    /// `get_all`
    pub get_all_ms: u64,
    /// `get_by_id`
    pub get_by_id_ms: u64,
    /// `get_all_lists`
    pub get_all_lists_ms: u64,
    /// `create`
    pub create_ms: u64,
    /// `update`
    pub update_ms: u64,
    /// `delete`
    pub delete_ms: u64,
    /// `get_tasks_by_list`
    pub get_by_list_ms: u64,
    /// `get_tasks_by_priority`
    pub get_by_priority_ms: u64,
    /// `get_today_tasks`
    pub get_today_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            enabled: true,
            get_all_ms: 300,
            get_by_id_ms: 200,
            get_all_lists_ms: 250,
            create_ms: 400,
            update_ms: 350,
            delete_ms: 300,
            get_by_list_ms: 250,
            get_by_priority_ms: 250,
            get_today_ms: 250,
        }
    }
}

impl Latency {
    /// Latency table with every delay disabled.
    #[must_use]
    pub fn none() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Delay applied before `op` resolves.
    #[must_use]
    pub const fn duration(&self, op: Operation) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = match op {
            Operation::GetAll => self.get_all_ms,
            Operation::GetById => self.get_by_id_ms,
            Operation::GetAllLists => self.get_all_lists_ms,
            Operation::Create => self.create_ms,
            Operation::Update => self.update_ms,
            Operation::Delete => self.delete_ms,
            Operation::GetByList => self.get_by_list_ms,
            Operation::GetByPriority => self.get_by_priority_ms,
            Operation::GetToday => self.get_today_ms,
        };
        Duration::from_millis(ms)
    }
}
