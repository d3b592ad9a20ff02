//! Authorship - collect the commit authors of every repository an account owns.
//!
//! The crate lists an account's repositories on a code hosting platform,
//! walks every branch of every repository with a bounded pool of workers,
//! and reduces the commits to a set of distinct author identities.
//!
//! # Features
//!
//! - `github` (default) - GitHub REST client over `reqwest`.
//!
//! # Example
//!
//! ```ignore
//! use authorship::authors::{aggregate, sorted_lines};
//! use authorship::crawl::{CrawlOptions, crawl_account};
//! use authorship::github::{Credentials, GitHubClient, GITHUB_API_HOST};
//!
//! let client = GitHubClient::new(GITHUB_API_HOST, Credentials::new("me", "token"))?;
//! let results = crawl_account(&client, "octocat", &CrawlOptions::default(), None).await?;
//! for line in sorted_lines(&aggregate(&results)) {
//!     println!("{line}");
//! }
//! ```

pub mod authors;
pub mod crawl;
pub mod http;
pub mod platform;

#[cfg(feature = "github")]
pub mod github;

pub use authors::{CommitAuthor, RepositoryAuthors, RepositoryInfo, aggregate, aggregate_by_repo};
pub use crawl::{CrawlOptions, CrawlProgress, IdentitySource, crawl, crawl_account};
pub use platform::{PlatformClient, PlatformError, PlatformRepo};
