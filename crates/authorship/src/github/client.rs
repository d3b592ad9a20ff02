//! GitHub API client creation and request plumbing.

use std::fmt;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::GitHubError;
use super::pagination::PageQuery;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpHeaders, HttpRequest, HttpTransport};
use crate::platform::{PAGE_SIZE, PageFetch};

/// Default GitHub REST API host.
pub const GITHUB_API_HOST: &str = "https://api.github.com";

/// Default per-request timeout for the reqwest transport.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Basic-auth credentials: a username and a personal access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.token);
        format!("Basic {}", BASE64.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// GitHub API client.
///
/// Cloning is cheap: the transport is shared, so every crawl worker holds its
/// own clone of the same client.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    credentials: Credentials,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("host", &self.host)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a new GitHub client backed by reqwest.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use authorship::github::{Credentials, GitHubClient, GITHUB_API_HOST};
    ///
    /// let client = GitHubClient::new(GITHUB_API_HOST, Credentials::new("me", "ghp_..."))?;
    /// ```
    pub fn new(host: &str, credentials: Credentials) -> Result<Self, GitHubError> {
        Self::with_timeout(host, credentials, DEFAULT_TIMEOUT)
    }

    /// Create a new GitHub client with a custom per-request timeout.
    pub fn with_timeout(
        host: &str,
        credentials: Credentials,
        timeout: StdDuration,
    ) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(timeout)
            .map_err(|e| GitHubError::Config(e.to_string()))?;

        Ok(Self::new_with_transport(
            host,
            credentials,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        host: &str,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn headers(&self) -> HttpHeaders {
        vec![
            (
                "Accept".to_string(),
                "application/vnd.github.v3+json".to_string(),
            ),
            ("User-Agent".to_string(), "authorship".to_string()),
            (
                "Authorization".to_string(),
                self.credentials.basic_auth_header(),
            ),
        ]
    }

    /// Build the URL of one page of a listing.
    pub(super) fn page_url(&self, query: &PageQuery, page: u32) -> Result<Url, GitHubError> {
        let mut url = Url::parse(&format!("{}{}", self.host, query.path))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());
            for (key, value) in &query.params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch one page of a listing.
    ///
    /// A 409 is reported as [`PageFetch::Empty`] when the query allows it;
    /// any other non-2xx status is an error.
    pub(super) async fn get_page<T: DeserializeOwned>(
        &self,
        query: &PageQuery,
        page: u32,
    ) -> Result<PageFetch<T>, GitHubError> {
        let url = self.page_url(query, page)?;

        let request = HttpRequest {
            url: url.into(),
            headers: self.headers(),
        };

        let response = self.transport.send(request).await?;

        match response.status {
            409 if query.empty_on_conflict => {
                tracing::debug!(path = %query.path, page, "Repository is empty");
                Ok(PageFetch::Empty)
            }
            s if (200..300).contains(&s) => {
                let items: Vec<T> = serde_json::from_slice(&response.body)?;
                tracing::debug!(path = %query.path, page, count = items.len(), "Fetched page");
                Ok(PageFetch::Items(items))
            }
            status => {
                let message = String::from_utf8_lossy(&response.body).to_string();
                Err(GitHubError::Api { status, message })
            }
        }
    }
}
