//! Configuration handling for the TUI

use crate::state::ValidationTriggers;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Revalidate after every value change (default: true)
    pub validate_on_change: Option<bool>,
    /// Revalidate when a field loses focus (default: true)
    pub validate_on_blur: Option<bool>,
    /// Show the errors/values JSON panels (default: true)
    pub show_state_panels: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "account-form", "account-form-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config dir
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn triggers(&self) -> ValidationTriggers {
        ValidationTriggers {
            on_change: self.validate_on_change.unwrap_or(true),
            on_blur: self.validate_on_blur.unwrap_or(true),
        }
    }

    pub fn show_state_panels(&self) -> bool {
        self.show_state_panels.unwrap_or(true)
    }
}
