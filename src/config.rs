// Plugin settings.
// Loads and persists the TOML settings file; missing keys take defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accounts;
use crate::error::{ProjectsError, Result};
use crate::github::GITHUB_API_BASE;

/// User-editable plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Comma-separated GitHub accounts or organisations to index.
    pub accounts: String,
    /// Query trigger typed before a repository name.
    pub trigger: String,
    /// Input prefix reserved for admin commands.
    pub admin_prefix: String,
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accounts: String::new(),
            trigger: "gh ".to_string(),
            admin_prefix: "a ".to_string(),
            api_base: GITHUB_API_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Account names parsed from `accounts`.
    pub fn account_list(&self) -> Vec<String> {
        accounts::parse_accounts(&self.accounts)
    }

    /// Reject values a hand-edited file could carry but the plugin cannot use.
    pub fn validate(&self) -> Result<()> {
        accounts::validate_accounts(&self.accounts)?;
        if self.admin_prefix.is_empty() {
            return Err(ProjectsError::Config(
                "admin_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings bound to the file they are persisted in.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    settings: Settings,
}

impl SettingsFile {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings: Settings = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents).map_err(|e| {
                ProjectsError::Config(format!("{}: {}", path.display(), e.message()))
            })?
        } else {
            Settings::default()
        };
        settings.validate().map_err(|e| match e {
            ProjectsError::Config(reason) => {
                ProjectsError::Config(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
        Ok(Self { path, settings })
    }

    /// Settings held in memory only, never written.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: PathBuf::new(),
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate and persist a new accounts value. Does not refresh anything.
    pub fn set_accounts(&mut self, value: &str) -> Result<()> {
        accounts::validate_accounts(value)?;
        self.settings.accounts = value.to_string();
        self.save()?;
        info!(accounts = value, "accounts updated");
        Ok(())
    }

    /// Write settings back to disk.
    pub fn save(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(&self.settings)
            .map_err(|e| ProjectsError::Config(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
