use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use taskboard_core::{Task, TaskList};

use crate::error::SeedError;

const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// Initial task and list collections loaded once at store construction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    /// Tasks, in most-recent-first storage order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Lists.
    #[serde(default)]
    pub lists: Vec<TaskList>,
}

impl Seed {
    /// Seed data bundled with the crate.
    ///
    /// # Errors
    /// Returns an error if the bundled JSON is malformed.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json_str(BUILTIN_SEED)
    }

    /// Parse and validate seed JSON.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, duplicate task ids or blank titles.
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        let seed: Self = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Read seed JSON from `path`.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(SeedError::DuplicateTaskId(task.id.clone()));
            }
            if task.title.trim().is_empty() {
                return Err(SeedError::EmptyTitle(task.id.clone()));
            }
        }
        Ok(())
    }
}
