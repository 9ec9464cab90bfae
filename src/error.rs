// Error types for gh-projects.
// Covers network, response-shape, cache file, and configuration failures.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectsError {
    #[error("GitHub request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Cache IO error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Cache file {path} is corrupt: {source}")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to open {url} in browser: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProjectsError {
    /// True for failures that happened talking to the remote API.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ProjectsError::Network(_) | ProjectsError::Status { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProjectsError>;
