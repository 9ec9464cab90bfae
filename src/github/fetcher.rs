// Repository fetcher.
// Follows search pagination for each account and collects non-archived repositories.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::repo::RepositoryRecord;

use super::types::Page;

/// A source of repository search pages.
///
/// Implemented by [`super::GitHubClient`]; tests substitute a scripted source.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// URL of the first search page for `account`.
    fn first_page_url(&self, account: &str) -> Result<String>;

    /// Fetch one page of results.
    async fn fetch_page(&mut self, url: &str) -> Result<Page>;
}

/// Fetch every non-archived repository for each account, in account order.
///
/// Any request failure aborts the whole fetch; nothing from earlier accounts
/// is returned.
pub async fn fetch_all<S: PageSource>(
    source: &mut S,
    accounts: &[String],
) -> Result<Vec<RepositoryRecord>> {
    let mut records = Vec::new();
    for account in accounts {
        let repos = fetch_account(source, account).await?;
        info!(%account, count = repos.len(), "fetched repositories");
        records.extend(repos);
    }
    Ok(records)
}

/// Fetch all pages of repositories owned by a single account.
pub async fn fetch_account<S: PageSource>(
    source: &mut S,
    account: &str,
) -> Result<Vec<RepositoryRecord>> {
    let mut repos = Vec::new();
    let mut next = Some(source.first_page_url(account)?);
    let mut visited = HashSet::new();
    let mut pages = 0u32;

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            warn!(%url, "next link repeats an earlier page, stopping");
            break;
        }
        let page = source.fetch_page(&url).await?;
        pages += 1;
        debug!(%url, items = page.items.len(), "received search page");

        for item in page.items {
            match RepositoryRecord::from_item(item) {
                Some(record) if record.is_valid() => repos.push(record),
                Some(record) => warn!(url = %record.url, "skipping repository without name or owner"),
                None => {}
            }
        }

        next = page.next;
    }

    debug!(account, pages, "pagination finished");
    Ok(repos)
}
