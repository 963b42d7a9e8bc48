use std::fmt;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The operation went through.
    Success,
    /// The operation failed; local state is unchanged.
    Failure,
}

/// Short message surfaced to the user after a mutation or load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Uppercase headline.
    pub message: &'static str,
}

impl Notice {
    /// Task created.
    pub const TASK_CREATED: Self = Self::success("TASK CREATED");
    /// Create rejected or failed.
    pub const CREATION_FAILED: Self = Self::failure("CREATION FAILED");
    /// Task marked complete.
    pub const TASK_COMPLETED: Self = Self::success("TASK COMPLETED");
    /// Task marked incomplete.
    pub const TASK_RESTORED: Self = Self::success("TASK RESTORED");
    /// Field edits saved.
    pub const TASK_UPDATED: Self = Self::success("TASK UPDATED");
    /// Toggle or edit failed.
    pub const UPDATE_FAILED: Self = Self::failure("UPDATE FAILED");
    /// Task deleted.
    pub const TASK_ELIMINATED: Self = Self::success("TASK ELIMINATED");
    /// Delete failed.
    pub const DELETION_FAILED: Self = Self::failure("DELETION FAILED");
    /// Initial load or retry failed.
    pub const LOAD_FAILED: Self = Self::failure("SYSTEM FAILURE: Unable to load tasks");

    const fn success(message: &'static str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message,
        }
    }

    const fn failure(message: &'static str) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message,
        }
    }

    /// Returns true for failure notices.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.level, NoticeLevel::Failure)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}
