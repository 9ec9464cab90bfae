// Launcher items and actions.
// Each action carries its resolved target by value.

use tracing::info;

use crate::error::{ProjectsError, Result};
use crate::repo::RepositoryRecord;

/// What an action does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    OpenUrl(String),
    Refresh,
}

/// A single activatable entry on a launcher item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: &'static str,
    pub text: &'static str,
    pub target: ActionTarget,
}

impl Action {
    fn open(id: &'static str, text: &'static str, url: String) -> Self {
        Self {
            id,
            text,
            target: ActionTarget::OpenUrl(url),
        }
    }

    /// The URL this action opens, if it opens one.
    pub fn url(&self) -> Option<&str> {
        match &self.target {
            ActionTarget::OpenUrl(url) => Some(url),
            ActionTarget::Refresh => None,
        }
    }
}

/// A result row handed to the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub subtext: String,
    /// Text placed in the input box on tab completion.
    pub input_action_text: Option<String>,
    pub actions: Vec<Action>,
}

impl Item {
    /// Item for a cached repository with open/pulls/issues actions.
    pub fn for_repo(repo: &RepositoryRecord, trigger: &str) -> Self {
        Self {
            id: repo.id(),
            text: repo.name.clone(),
            subtext: repo.description.clone(),
            input_action_text: Some(format!("{}{}", trigger, repo.name)),
            actions: vec![
                Action::open("open", "Open repo on GitHub", repo.url.clone()),
                Action::open("prs", "Open pull requests", repo.pulls_url()),
                Action::open("issues", "Open issues", repo.issues_url()),
            ],
        }
    }

    /// Admin item that forces a full re-fetch.
    pub fn refresh() -> Self {
        Self {
            id: "refresh".to_string(),
            text: "Refresh".to_string(),
            subtext: "Update cached repos from GitHub API".to_string(),
            input_action_text: None,
            actions: vec![Action {
                id: "update",
                text: "Update",
                target: ActionTarget::Refresh,
            }],
        }
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }
}

/// Opens URLs on behalf of actions.
pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open_url(&self, url: &str) -> Result<()> {
        info!(url, "opening in browser");
        open::that(url).map_err(|source| ProjectsError::Browser {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepositoryRecord {
        RepositoryRecord::new(
            "octocat",
            "spoon-knife",
            "https://github.com/octocat/spoon-knife",
            "fork me",
        )
    }

    #[test]
    fn test_repo_item() {
        let item = Item::for_repo(&repo(), "gh ");

        assert_eq!(item.id, "octocat-spoon-knife");
        assert_eq!(item.text, "spoon-knife");
        assert_eq!(item.subtext, "fork me");
        assert_eq!(item.input_action_text.as_deref(), Some("gh spoon-knife"));
        assert_eq!(
            item.action("open").and_then(Action::url),
            Some("https://github.com/octocat/spoon-knife")
        );
        assert_eq!(
            item.action("prs").and_then(Action::url),
            Some("https://github.com/octocat/spoon-knife/pulls")
        );
        assert_eq!(
            item.action("issues").and_then(Action::url),
            Some("https://github.com/octocat/spoon-knife/issues")
        );
    }

    #[test]
    fn test_items_do_not_share_targets() {
        let a = Item::for_repo(&repo(), "gh ");
        let b = Item::for_repo(
            &RepositoryRecord::new("octocat", "other", "https://github.com/octocat/other", ""),
            "gh ",
        );

        assert_ne!(a.action("open").unwrap().url(), b.action("open").unwrap().url());
    }

    #[test]
    fn test_refresh_item() {
        let item = Item::refresh();

        assert_eq!(item.id, "refresh");
        assert_eq!(item.actions.len(), 1);
        assert_eq!(item.actions[0].target, ActionTarget::Refresh);
        assert!(item.actions[0].url().is_none());
    }
}
