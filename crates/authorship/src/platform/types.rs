use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::Result;

/// A repository descriptor from any platform (platform-agnostic representation).
///
/// Descriptors are transient: the crawler hands each one to exactly one
/// worker, which consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRepo {
    /// Full name including owner (e.g., "owner/repo").
    pub full_name: String,
    /// Repository name.
    pub name: String,
    /// Owner login.
    pub owner: String,
    /// Whether the repository is a fork.
    pub is_fork: bool,
    /// When the repository was created. For forks this is the fork point.
    pub created_at: DateTime<Utc>,
}

impl PlatformRepo {
    /// The cutoff below which commits are inherited from the upstream repository.
    ///
    /// Only forks have one.
    #[inline]
    #[must_use]
    pub fn fork_cutoff(&self) -> Option<DateTime<Utc>> {
        self.is_fork.then_some(self.created_at)
    }
}

/// A name/email identity recorded on a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

/// A commit as returned by the commit listing, reduced to the fields the
/// crawler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Commit SHA.
    pub sha: String,
    /// The identity that authored the change.
    pub author: Option<GitIdentity>,
    /// The identity that recorded the commit.
    pub committer: Option<GitIdentity>,
}

/// Trait for code hosting platform clients.
///
/// The crawler only ever needs three listings. Implementors should:
/// - Handle pagination internally for every list operation
/// - Apply the fork cutoff when listing commits of a fork
/// - Report an empty repository as zero commits rather than an error
/// - Convert platform-specific errors to `PlatformError`
///
/// Clients are shared by every crawl worker, so they are cloned cheaply and
/// must not carry per-request mutable state.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Short platform name used in logs (e.g. "github").
    fn platform_name(&self) -> &'static str;

    /// List every repository owned by `account`, forks included.
    async fn list_user_repos(&self, account: &str) -> Result<Vec<PlatformRepo>>;

    /// List the distinct branch names of a repository.
    async fn list_branches(&self, repo: &PlatformRepo) -> Result<BTreeSet<String>>;

    /// List the commits reachable from `branch`.
    ///
    /// For forks only commits made after [`PlatformRepo::fork_cutoff`] are
    /// returned.
    async fn list_commits(&self, repo: &PlatformRepo, branch: &str) -> Result<Vec<RawCommit>>;
}
