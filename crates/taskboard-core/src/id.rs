use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, convert::Infallible, fmt, str::FromStr};
use uuid::Uuid;

/// Identifier of a task.
///
/// Seeded tasks carry arbitrary ids (`"1"`, `"task-42"`), so the identifier is
/// an opaque string rather than a parsed UUID.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a task list.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Sentinel value for tasks that are not assigned to any list.
    pub const DEFAULT: &'static str = "default";

    /// The "unassigned" list.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    /// Returns true for the `default` sentinel.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ListId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
