// gh-projects: quick access to GitHub repositories from a launcher.
// Caches every repository for the configured accounts and matches them by name.

pub mod accounts;
pub mod actions;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod matcher;
pub mod plugin;
pub mod repo;

pub use accounts::parse_accounts;
pub use actions::{Action, ActionTarget, Item, SystemBrowser, UrlOpener};
pub use cache::CacheStore;
pub use config::{Settings, SettingsFile};
pub use error::{ProjectsError, Result};
pub use github::{GitHubClient, Page, PageSource, SearchItem};
pub use matcher::matches;
pub use plugin::{Notice, NoticeLevel, Plugin, RefreshOutcome};
pub use repo::RepositoryRecord;
