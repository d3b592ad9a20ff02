//! Paginated listing of GitHub endpoints.
//!
//! Every listing the crawler uses is a `per_page`/`page` walk; this module
//! describes the three endpoints and binds the shared page walk to the client.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

use crate::platform::{PAGE_SIZE, walk_pages};

use super::client::GitHubClient;
use super::error::GitHubError;

/// Description of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Path of the endpoint, relative to the API host.
    pub path: String,
    /// Query parameters sent with every page, after `per_page` and `page`.
    pub params: Vec<(String, String)>,
    /// Treat a 409 answer as "no items" instead of an error.
    pub empty_on_conflict: bool,
}

impl PageQuery {
    /// Query for the repositories owned by a user.
    pub fn user_repos(account: &str) -> Self {
        Self {
            path: format!("/users/{}/repos", account),
            params: Vec::new(),
            empty_on_conflict: false,
        }
    }

    /// Query for the branches of a repository.
    pub fn branches(full_name: &str) -> Self {
        Self {
            path: format!("/repos/{}/branches", full_name),
            params: Vec::new(),
            empty_on_conflict: false,
        }
    }

    /// Query for the commits reachable from a branch.
    ///
    /// `since` restricts the listing to commits made after the fork point.
    /// GitHub answers 409 for a repository without commits.
    pub fn commits(full_name: &str, branch: &str, since: Option<DateTime<Utc>>) -> Self {
        let mut params = vec![("sha".to_string(), branch.to_string())];
        if let Some(since) = since {
            params.push(("since".to_string(), format_since(since)));
        }

        Self {
            path: format!("/repos/{}/commits", full_name),
            params,
            empty_on_conflict: true,
        }
    }
}

/// Render a timestamp the way GitHub reports `created_at`, e.g. `2020-01-01T00:00:00Z`.
pub fn format_since(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl GitHubClient {
    /// Fetch every page of a listing and concatenate the items.
    pub async fn fetch_pages<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
    ) -> Result<Vec<T>, GitHubError> {
        let items = walk_pages(PAGE_SIZE, move |page| self.get_page::<T>(query, page)).await?;
        tracing::debug!(path = %query.path, total = items.len(), "Fetched all pages");
        Ok(items)
    }
}
