// Cache path utilities.
// Resolves the platform cache, config, and data directories for gh-projects.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// File name of the repository cache within the cache directory.
pub const CACHE_FILE_NAME: &str = "gh_cache.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "gh-projects")
}

/// Get the base cache directory (~/.cache/gh-projects on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory (~/.config/gh-projects on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Directory for log files.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

/// Path to the settings file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Path to the repository cache inside `dir`.
pub fn repos_cache_path(dir: &Path) -> PathBuf {
    dir.join(CACHE_FILE_NAME)
}
