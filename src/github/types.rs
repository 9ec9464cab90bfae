// GitHub API response types.
// Defines the subset of the repository search response the fetcher reads.

use serde::{Deserialize, Serialize};

/// Owner of a repository in a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOwner {
    pub login: String,
}

/// One repository in a search result page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub owner: ItemOwner,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Body of `GET /search/repositories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<SearchItem>,
}

/// One page of search results plus the link to the next page, if any.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<SearchItem>,
    pub next: Option<String>,
}
