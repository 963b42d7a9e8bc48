use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskboard_core::ListSelector;
use taskboard_store::{Latency, Seed};

const CONFIG_DIR: &str = ".taskboard";
const CONFIG_FILE: &str = "config.toml";

/// Top-level project configuration loaded from `.taskboard/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Simulated store latency.
    #[serde(default)]
    pub latency: Latency,
    /// Seed data source.
    #[serde(default)]
    pub seed: SeedConfig,
    /// Board presentation defaults.
    #[serde(default)]
    pub board: BoardConfig,
}

impl ProjectConfig {
    /// Load configuration from a known working directory.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let workdir = workdir.as_ref();
        let config_path = workdir.join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.seed.resolve_against(workdir);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.board.ensure_valid_default()?;
        self.seed.ensure_exists()
    }

    /// Load the configured seed, or the builtin one when none is configured.
    ///
    /// # Errors
    /// Returns an error when the seed file cannot be read or is invalid.
    pub fn load_seed(&self) -> Result<Seed> {
        match self.seed.path() {
            Some(path) => Seed::from_path(path)
                .with_context(|| format!("failed to load seed {}", path.display())),
            None => Seed::builtin().context("failed to load builtin seed"),
        }
    }
}

/// `[seed]` table.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    path: Option<PathBuf>,
}

impl SeedConfig {
    /// Seed configuration pointing at `path`.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Configured seed file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn resolve_against(&mut self, workdir: &Path) {
        if let Some(path) = self.path.as_mut()
            && path.is_relative()
        {
            *path = workdir.join(&*path);
        }
    }

    fn ensure_exists(&self) -> Result<()> {
        if let Some(path) = self.path()
            && !path.exists()
        {
            bail!("seed file '{}' does not exist", path.display());
        }
        Ok(())
    }
}

/// `[board]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "BoardConfig::default_list_token")]
    default_list: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_list: Self::default_list_token(),
        }
    }
}

impl BoardConfig {
    fn default_list_token() -> String {
        ListSelector::ALL.to_owned()
    }

    /// Selector the board opens on.
    #[must_use]
    pub fn initial_selector(&self) -> ListSelector {
        self.default_list.parse().unwrap_or_default()
    }

    fn ensure_valid_default(&self) -> Result<()> {
        if self.default_list.trim().is_empty() {
            bail!("board.default_list must not be empty");
        }
        Ok(())
    }
}
