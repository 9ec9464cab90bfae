// Runtime plugin instance.
// Owns the cached repository list and exposes load, refresh, query, and activate.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::actions::{Action, ActionTarget, Item, UrlOpener};
use crate::cache::CacheStore;
use crate::config::{Settings, SettingsFile};
use crate::error::{ProjectsError, Result};
use crate::github::{GitHubClient, PageSource, fetch_all};
use crate::matcher;
use crate::repo::RepositoryRecord;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// A user-visible message about cache loading or refreshing.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Error, message)
    }

    fn at(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Result of a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed { count: usize },
    /// A cache file already existed and overwrite was not requested.
    Skipped,
}

/// The plugin: settings, cache file, page source, and the in-memory collection.
pub struct Plugin<S: PageSource = GitHubClient> {
    settings: SettingsFile,
    store: CacheStore,
    source: S,
    repos: Vec<RepositoryRecord>,
    /// Whether `repos` reflects a readable cache file.
    cache_loaded: bool,
    notices: Vec<Notice>,
}

impl Plugin<GitHubClient> {
    /// Open the plugin with settings from `config_path` and the cache in `cache_dir`.
    pub fn open(config_path: &Path, cache_dir: &Path) -> Result<Self> {
        let settings = SettingsFile::load(config_path)?;
        let client = GitHubClient::with_base(&settings.settings().api_base)?;
        Ok(Self::new(settings, CacheStore::in_dir(cache_dir), client))
    }
}

impl<S: PageSource> Plugin<S> {
    /// Create the plugin and load whatever is cached.
    ///
    /// A corrupt cache file is treated as empty and reported as a notice;
    /// the file itself is left alone until the next successful refresh.
    pub fn new(settings: SettingsFile, store: CacheStore, source: S) -> Self {
        let mut plugin = Self {
            settings,
            store,
            source,
            repos: Vec::new(),
            cache_loaded: false,
            notices: Vec::new(),
        };
        plugin.load();
        plugin
    }

    fn load(&mut self) {
        match self.store.load() {
            Ok(repos) => {
                info!(count = repos.len(), "repository cache loaded");
                self.repos = repos;
                self.cache_loaded = true;
            }
            Err(e @ ProjectsError::CacheCorrupt { .. }) => {
                warn!(error = %e, "ignoring corrupt repository cache");
                self.notices
                    .push(Notice::warn(format!("{}; refresh to rebuild it", e)));
            }
            Err(e) => {
                warn!(error = %e, "failed to read repository cache");
                self.notices
                    .push(Notice::error(format!("Could not read cache: {}", e)));
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached collection, in fetch order.
    pub fn repos(&self) -> &[RepositoryRecord] {
        &self.repos
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Persist a new accounts value. Call [`Plugin::refresh`] separately.
    pub fn set_accounts(&mut self, value: &str) -> Result<()> {
        self.settings.set_accounts(value)
    }

    /// Re-fetch every account and overwrite the cache.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        self.refresh_if_needed(true).await
    }

    /// Refresh unless `overwrite` is false and a readable cache file already exists.
    ///
    /// On failure the cache file and the in-memory collection are unchanged.
    pub async fn refresh_if_needed(&mut self, overwrite: bool) -> Result<RefreshOutcome> {
        if !overwrite && self.cache_loaded && self.store.exists() {
            info!(path = %self.store.path().display(), "cache present, skipping refresh");
            return Ok(RefreshOutcome::Skipped);
        }

        let accounts = self.settings.settings().account_list();
        if accounts.is_empty() {
            warn!("no accounts configured");
        }

        match self.fetch_and_save(&accounts).await {
            Ok(repos) => {
                let count = repos.len();
                self.repos = repos;
                self.cache_loaded = true;
                info!(count, accounts = accounts.len(), "refresh complete");
                self.notices
                    .push(Notice::info(format!("Cached {} repositories", count)));
                Ok(RefreshOutcome::Refreshed { count })
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping previous cache");
                self.notices
                    .push(Notice::error(format!("Refresh failed: {}", e)));
                Err(e)
            }
        }
    }

    async fn fetch_and_save(&mut self, accounts: &[String]) -> Result<Vec<RepositoryRecord>> {
        let repos = fetch_all(&mut self.source, accounts).await?;
        self.store.save(&repos)?;
        Ok(repos)
    }

    /// Items for the text typed after the trigger.
    pub fn handle_query(&self, text: &str) -> Vec<Item> {
        let settings = self.settings.settings();
        if !settings.admin_prefix.is_empty() && text.starts_with(&settings.admin_prefix) {
            return vec![Item::refresh()];
        }

        matcher::filter(&self.repos, text)
            .map(|repo| Item::for_repo(repo, &settings.trigger))
            .collect()
    }

    /// Look up a cached repository by `account/name` (case-insensitive).
    pub fn find(&self, full_name: &str) -> Option<&RepositoryRecord> {
        self.repos
            .iter()
            .find(|repo| repo.full_name().eq_ignore_ascii_case(full_name))
    }

    /// Run an action from an item returned by [`Plugin::handle_query`].
    pub async fn activate(&mut self, action: &Action, opener: &impl UrlOpener) -> Result<()> {
        match &action.target {
            ActionTarget::OpenUrl(url) => opener.open_url(url),
            ActionTarget::Refresh => self.refresh().await.map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::github::fetcher::testing::{ScriptedPages, item};

    struct RecordingOpener(RefCell<Vec<String>>);

    impl UrlOpener for RecordingOpener {
        fn open_url(&self, url: &str) -> Result<()> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn settings(accounts: &str) -> SettingsFile {
        SettingsFile::in_memory(Settings {
            accounts: accounts.to_string(),
            ..Settings::default()
        })
    }

    fn octocat_pages() -> ScriptedPages {
        ScriptedPages::new().page(
            &ScriptedPages::first_url("octocat"),
            vec![
                item("octocat", "hello-world", false),
                item("octocat", "spoon-knife", false),
                item("octocat", "old-proj", true),
            ],
            None,
        )
    }

    #[tokio::test]
    async fn test_refresh_populates_cache() {
        let temp_dir = TempDir::new().unwrap();
        let mut plugin = Plugin::new(
            settings("octocat"),
            CacheStore::in_dir(temp_dir.path()),
            octocat_pages(),
        );

        let outcome = plugin.refresh().await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Refreshed { count: 2 });
        assert_eq!(plugin.repos().len(), 2);
        assert_eq!(plugin.store().load().unwrap(), plugin.repos().to_vec());
    }

    #[tokio::test]
    async fn test_refresh_if_needed_skips_existing() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        store.save(&[]).unwrap();

        let mut plugin = Plugin::new(settings("octocat"), store, octocat_pages());
        let outcome = plugin.refresh_if_needed(false).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Skipped);
        assert!(plugin.source.requested.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_if_needed_fetches_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let mut plugin = Plugin::new(
            settings("octocat"),
            CacheStore::in_dir(temp_dir.path()),
            octocat_pages(),
        );

        let outcome = plugin.refresh_if_needed(false).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Refreshed { count: 2 });
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        let previous = vec![RepositoryRecord::new(
            "octocat",
            "kept",
            "https://github.com/octocat/kept",
            "",
        )];
        store.save(&previous).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let failing = ScriptedPages::new().fail(&ScriptedPages::first_url("octocat"));
        let mut plugin = Plugin::new(settings("octocat"), store, failing);

        assert!(plugin.refresh().await.is_err());
        assert_eq!(plugin.repos(), previous.as_slice());
        assert_eq!(fs::read_to_string(plugin.store().path()).unwrap(), before);
        assert!(
            plugin
                .notices()
                .iter()
                .any(|n| n.level == NoticeLevel::Error)
        );
    }

    #[tokio::test]
    async fn test_corrupt_cache_loads_empty_with_notice() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        fs::write(store.path(), "[{]").unwrap();

        let mut plugin = Plugin::new(settings("octocat"), store, octocat_pages());

        assert!(plugin.repos().is_empty());
        let notices = plugin.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warn);

        // A refresh rebuilds it
        plugin.refresh().await.unwrap();
        assert_eq!(plugin.store().load().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_if_needed_rebuilds_corrupt_cache() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        fs::write(store.path(), "[{]").unwrap();

        let mut plugin = Plugin::new(settings("octocat"), store, octocat_pages());
        let outcome = plugin.refresh_if_needed(false).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Refreshed { count: 2 });
        assert_eq!(plugin.repos().len(), 2);
        assert_eq!(plugin.store().load().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_admin_prefix_is_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        store
            .save(&[RepositoryRecord::new(
                "octocat",
                "hello-world",
                "https://github.com/octocat/hello-world",
                "",
            )])
            .unwrap();
        let settings = SettingsFile::in_memory(Settings {
            accounts: "octocat".to_string(),
            admin_prefix: String::new(),
            ..Settings::default()
        });

        let plugin = Plugin::new(settings, store, ScriptedPages::new());
        let items = plugin.handle_query("hello");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "octocat-hello-world");
    }

    #[tokio::test]
    async fn test_admin_prefix_offers_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let mut plugin = Plugin::new(
            settings("octocat"),
            CacheStore::in_dir(temp_dir.path()),
            octocat_pages(),
        );

        let items = plugin.handle_query("a ");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "refresh");

        let action = items[0].actions[0].clone();
        plugin
            .activate(&action, &RecordingOpener(RefCell::new(Vec::new())))
            .await
            .unwrap();
        assert_eq!(plugin.repos().len(), 2);
    }

    #[tokio::test]
    async fn test_query_and_open() {
        let temp_dir = TempDir::new().unwrap();
        let mut plugin = Plugin::new(
            settings("octocat"),
            CacheStore::in_dir(temp_dir.path()),
            octocat_pages(),
        );
        plugin.refresh().await.unwrap();

        assert_eq!(plugin.handle_query("").len(), 2);

        let items = plugin.handle_query("SPOON");
        assert_eq!(items.len(), 1);

        let opener = RecordingOpener(RefCell::new(Vec::new()));
        for action in items[0].actions.clone() {
            plugin.activate(&action, &opener).await.unwrap();
        }
        assert_eq!(
            opener.0.into_inner(),
            vec![
                "https://github.com/octocat/spoon-knife".to_string(),
                "https://github.com/octocat/spoon-knife/pulls".to_string(),
                "https://github.com/octocat/spoon-knife/issues".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_find_by_full_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut plugin = Plugin::new(
            settings("octocat"),
            CacheStore::in_dir(temp_dir.path()),
            octocat_pages(),
        );
        plugin.refresh().await.unwrap();

        assert!(plugin.find("Octocat/Hello-World").is_some());
        assert!(plugin.find("octocat/old-proj").is_none());
    }

    #[tokio::test]
    async fn test_loads_existing_cache_on_start() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::in_dir(temp_dir.path());
        let cached = vec![RepositoryRecord::new(
            "octocat",
            "hello-world",
            "https://github.com/octocat/hello-world",
            "",
        )];
        store.save(&cached).unwrap();

        let plugin = Plugin::new(settings("octocat"), store, ScriptedPages::new());

        assert_eq!(plugin.repos(), cached.as_slice());
        assert!(plugin.notices().is_empty());
    }
}
