// GitHub API endpoint functions.
// Builds the repository search URL and serves search pages to the fetcher.

use reqwest::Url;

use crate::error::{ProjectsError, Result};

use super::client::GitHubClient;
use super::fetcher::PageSource;
use super::types::Page;

/// Search URL for all repositories owned by `account`, with the query encoded.
pub fn search_repositories_url(api_base: &str, account: &str) -> Result<String> {
    let endpoint = format!("{}/search/repositories", api_base.trim_end_matches('/'));
    let query = format!("user:{}", account.to_lowercase());
    let url = Url::parse_with_params(&endpoint, &[("q", query.as_str())])
        .map_err(|e| ProjectsError::Config(format!("invalid API base {:?}: {}", api_base, e)))?;
    Ok(url.into())
}

impl PageSource for GitHubClient {
    fn first_page_url(&self, account: &str) -> Result<String> {
        search_repositories_url(self.api_base(), account)
    }

    async fn fetch_page(&mut self, url: &str) -> Result<Page> {
        self.get_search_page(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_lowercases_account() {
        assert_eq!(
            search_repositories_url("https://api.github.com", "OctoCat").unwrap(),
            "https://api.github.com/search/repositories?q=user%3Aoctocat"
        );
    }

    #[test]
    fn test_client_first_page_url() {
        let client = GitHubClient::new().unwrap();
        assert_eq!(
            client.first_page_url("Rust-Lang").unwrap(),
            "https://api.github.com/search/repositories?q=user%3Arust-lang"
        );
    }

    #[test]
    fn test_search_url_encodes_account() {
        let url = search_repositories_url("https://api.github.com", "a&b #c").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs, vec![("q".to_string(), "user:a&b #c".to_string())]);
        assert!(parsed.fragment().is_none());
    }

    #[test]
    fn test_search_url_rejects_bad_base() {
        assert!(search_repositories_url("not a url", "octocat").is_err());
    }
}
