//! GitHub REST API client for the author crawl.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Response payloads
//! - [`client`] - Client creation, credentials, and single-page requests
//! - [`pagination`] - Endpoint descriptions and the page walk
//! - [`repo`] - Repository, branch, and commit listings
//! - [`convert`] - Conversion to platform types
//!
//! # Example
//!
//! ```ignore
//! use authorship::crawl::{CrawlOptions, crawl_account};
//! use authorship::github::{Credentials, GITHUB_API_HOST, GitHubClient};
//!
//! let client = GitHubClient::new(GITHUB_API_HOST, Credentials::new("me", &token))?;
//! let repos = crawl_account(&client, "octocat", &CrawlOptions::default(), None).await?;
//! ```

mod client;
mod convert;
mod error;
mod pagination;
mod repo;
mod types;

pub use error::GitHubError;

pub use types::{GitHubBranch, GitHubCommit, GitHubCommitDetail, GitHubGitUser, GitHubOwner, GitHubRepo};

pub use client::{Credentials, DEFAULT_TIMEOUT, GITHUB_API_HOST, GitHubClient};

pub use pagination::{PageQuery, format_since};

pub use convert::{to_platform_repo, to_raw_commit};
