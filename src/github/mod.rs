// GitHub API module.
// Provides the client, search types, and the paginating repository fetcher.

pub mod client;
pub mod endpoints;
pub mod fetcher;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::search_repositories_url;
pub use fetcher::{PageSource, fetch_account, fetch_all};
pub use types::*;
