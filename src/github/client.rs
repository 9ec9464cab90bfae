// GitHub API HTTP client.
// Handles default headers, status checks, and Link-header pagination.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, LINK, USER_AGENT},
};
use tracing::debug;

use crate::error::{ProjectsError, Result};

use super::types::{Page, SearchResponse};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Unauthenticated GitHub API client.
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_base(GITHUB_API_BASE)
    }

    /// Create a client against a different API root (e.g. GitHub Enterprise).
    pub fn with_base(api_base: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gh-projects"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Make a GET request to an absolute URL.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        check_response(response)
    }

    /// Fetch and decode one page of repository search results.
    pub async fn get_search_page(&self, url: &str) -> Result<Page> {
        let response = self.get(url).await?;
        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ProjectsError::MalformedResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Page {
            items: parsed.items,
            next,
        })
    }
}

/// Check response status and convert errors.
fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        status => Err(ProjectsError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        }),
    }
}

/// Extract the `rel="next"` target from a Link header value.
///
/// Format: `<https://...&page=2>; rel="next", <https://...&page=5>; rel="last"`
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
