//! Per-workspace settings from `natinsightd.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "natinsightd.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file inside the workspace directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
        }
    }
}

fn default_file_name() -> String {
    "natinsight.sqlite3".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows in the top performers table when the caller does not say.
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_performers: default_top_performers(),
        }
    }
}

fn default_top_performers() -> usize {
    5
}

impl Config {
    /// `Ok(None)` when the workspace has no config file.
    pub fn load_from_workspace(workspace: &Path) -> Result<Option<Config>> {
        let path = workspace.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        let config = Self::parse(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn parse(raw: &str) -> Result<Config> {
        let config: Config = toml::from_str(raw)?;
        if config.store.file_name.trim().is_empty() {
            anyhow::bail!("store.file_name must not be empty");
        }
        Ok(config)
    }
}
