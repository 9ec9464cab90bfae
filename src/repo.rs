// Repository records held in the cache.
// One record per non-archived repository returned by the search API.

use serde::{Deserialize, Serialize};

use crate::github::SearchItem;

/// A cached repository summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Owner login.
    pub account: String,
    pub name: String,
    /// Canonical web URL (`html_url`).
    pub url: String,
    /// Empty when the repository has no description.
    #[serde(default)]
    pub description: String,
}

impl RepositoryRecord {
    pub fn new(
        account: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }

    /// Build a record from a search result, or `None` for archived repositories.
    pub fn from_item(item: SearchItem) -> Option<Self> {
        if item.archived {
            return None;
        }
        Some(Self {
            account: item.owner.login,
            name: item.name,
            url: item.html_url,
            description: item.description.unwrap_or_default(),
        })
    }

    /// Stable identifier used for launcher items.
    pub fn id(&self) -> String {
        format!("{}-{}", self.account, self.name)
    }

    /// `account/name`, as shown on GitHub.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.account, self.name)
    }

    pub fn pulls_url(&self) -> String {
        format!("{}/pulls", self.url)
    }

    pub fn issues_url(&self) -> String {
        format!("{}/issues", self.url)
    }

    /// Records with an empty name or account are never persisted.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.account.is_empty()
    }
}
