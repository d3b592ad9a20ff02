//! Conversion from GitHub payloads to platform types.

use crate::platform::{GitIdentity, PlatformRepo, RawCommit};

use super::types::{GitHubCommit, GitHubGitUser, GitHubRepo};

/// Convert a GitHub repository entry to a platform repository descriptor.
pub fn to_platform_repo(repo: &GitHubRepo) -> PlatformRepo {
    PlatformRepo {
        full_name: repo.full_name.clone(),
        name: repo.name.clone(),
        owner: repo.owner.login.clone(),
        is_fork: repo.fork,
        created_at: repo.created_at,
    }
}

fn to_identity(user: &GitHubGitUser) -> GitIdentity {
    GitIdentity {
        name: user.name.clone(),
        email: user.email.clone(),
        date: user.date,
    }
}

/// Convert a GitHub commit entry to a raw commit.
pub fn to_raw_commit(commit: &GitHubCommit) -> RawCommit {
    RawCommit {
        sha: commit.sha.clone(),
        author: commit.commit.author.as_ref().map(to_identity),
        committer: commit.commit.committer.as_ref().map(to_identity),
    }
}
