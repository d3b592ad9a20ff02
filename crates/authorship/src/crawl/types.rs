//! Crawl options and constants.

use serde::Deserialize;

/// Default number of repositories processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Which identity of a commit counts as its author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentitySource {
    /// The identity that wrote the change.
    #[default]
    Author,
    /// The identity that recorded the commit.
    Committer,
}

/// Options for a crawl.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of repositories processed at the same time.
    pub concurrency: usize,
    /// Which commit identity to collect.
    pub identity: IdentitySource,
    /// Skip forks entirely when listing instead of cutting their history.
    pub exclude_forks: bool,
    /// Drop GitHub's `noreply@github.com` placeholder identity.
    pub drop_noreply: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            identity: IdentitySource::Author,
            exclude_forks: false,
            drop_noreply: false,
        }
    }
}
