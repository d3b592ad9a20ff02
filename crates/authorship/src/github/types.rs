//! GitHub REST API payloads.
//!
//! Only the fields the crawler reads are declared, which keeps decoding
//! resilient to additions on GitHub's side.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An entry of `GET /users/{account}/repos`.
///
/// API docs: https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    /// Repository name.
    pub name: String,
    /// Full name including owner (e.g., "owner/repo").
    pub full_name: String,
    /// Whether the repository is a fork.
    pub fork: bool,
    /// When the repository was created.
    pub created_at: DateTime<Utc>,
    /// Owner information.
    pub owner: GitHubOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

/// An entry of `GET /repos/{full_name}/branches`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubBranch {
    pub name: String,
}

/// An entry of `GET /repos/{full_name}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    pub sha: String,
    pub commit: GitHubCommitDetail,
}

/// The git-level part of a commit entry.
///
/// `author` and `committer` here are the identities recorded in the commit
/// object, not the GitHub accounts they may map to.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitDetail {
    pub author: Option<GitHubGitUser>,
    pub committer: Option<GitHubGitUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubGitUser {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}
