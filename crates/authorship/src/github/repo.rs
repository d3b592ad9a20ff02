//! Repository, branch, and commit listings.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::platform::{self, PlatformClient, PlatformRepo, RawCommit};

use super::client::GitHubClient;
use super::convert::{to_platform_repo, to_raw_commit};
use super::error::GitHubError;
use super::pagination::PageQuery;
use super::types::{GitHubBranch, GitHubCommit, GitHubRepo};

impl GitHubClient {
    /// List every repository owned by `account`.
    ///
    /// Forks are kept; their history is cut at the fork point when commits
    /// are listed.
    pub async fn list_user_repos(&self, account: &str) -> Result<Vec<PlatformRepo>, GitHubError> {
        let repos: Vec<GitHubRepo> = self.fetch_pages(&PageQuery::user_repos(account)).await?;
        Ok(repos.iter().map(to_platform_repo).collect())
    }

    /// List the distinct branch names of a repository.
    pub async fn list_branches(&self, repo: &PlatformRepo) -> Result<BTreeSet<String>, GitHubError> {
        let branches: Vec<GitHubBranch> = self
            .fetch_pages(&PageQuery::branches(&repo.full_name))
            .await?;
        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    /// List the commits of one branch.
    ///
    /// For a fork every request carries `since=<created_at>`. An empty
    /// repository yields no commits.
    pub async fn list_commits(
        &self,
        repo: &PlatformRepo,
        branch: &str,
    ) -> Result<Vec<RawCommit>, GitHubError> {
        let query = PageQuery::commits(&repo.full_name, branch, repo.fork_cutoff());
        let commits: Vec<GitHubCommit> = self.fetch_pages(&query).await?;
        Ok(commits.iter().map(to_raw_commit).collect())
    }
}

#[async_trait]
impl PlatformClient for GitHubClient {
    fn platform_name(&self) -> &'static str {
        "github"
    }

    async fn list_user_repos(&self, account: &str) -> platform::Result<Vec<PlatformRepo>> {
        GitHubClient::list_user_repos(self, account)
            .await
            .map_err(platform::PlatformError::from)
    }

    async fn list_branches(&self, repo: &PlatformRepo) -> platform::Result<BTreeSet<String>> {
        GitHubClient::list_branches(self, repo)
            .await
            .map_err(platform::PlatformError::from)
    }

    async fn list_commits(
        &self,
        repo: &PlatformRepo,
        branch: &str,
    ) -> platform::Result<Vec<RawCommit>> {
        GitHubClient::list_commits(self, repo, branch)
            .await
            .map_err(platform::PlatformError::from)
    }
}
