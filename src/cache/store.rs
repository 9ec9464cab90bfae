// Cache store for the repository list.
// Reads and atomically rewrites a pretty-printed JSON array of records.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ProjectsError, Result};
use crate::repo::RepositoryRecord;

/// On-disk repository cache backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Store backed by `gh_cache.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(super::paths::repos_cache_path(dir))
    }

    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the cache file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read all cached records. A missing file is an empty cache.
    pub fn load(&self) -> Result<Vec<RepositoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let records: Vec<RepositoryRecord> =
            serde_json::from_str(&contents).map_err(|source| ProjectsError::CacheCorrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), count = records.len(), "loaded cache");
        Ok(records)
    }

    /// Replace the cache file with `records`.
    pub fn save(&self, records: &[RepositoryRecord]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records).map_err(std::io::Error::from)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&temp_path, &self.path, json.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = records.len(), "saved cache");
        Ok(())
    }
}

fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(temp_path, path)
}
