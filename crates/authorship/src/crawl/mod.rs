//! Concurrent author crawl across an account's repositories.
//!
//! # Module Structure
//!
//! - [`types`] - Crawl options and constants
//! - [`progress`] - Progress reporting: `CrawlProgress`, `ProgressCallback`, `emit()`
//! - [`queue`] - The shared work queue workers claim repositories from
//! - [`engine`] - Worker pool: `crawl()`, `crawl_account()`
//!
//! # Example
//!
//! ```ignore
//! use authorship::crawl::{CrawlOptions, crawl_account};
//! use authorship::github::{Credentials, GitHubClient, GITHUB_API_HOST};
//!
//! let client = GitHubClient::new(GITHUB_API_HOST, Credentials::new("me", "token"))?;
//! let results = crawl_account(&client, "octocat", &CrawlOptions::default(), None).await?;
//! println!("Crawled {} repositories", results.len());
//! ```

pub mod engine;
mod progress;
mod queue;
mod types;

pub use types::{CrawlOptions, DEFAULT_CONCURRENCY, IdentitySource};

pub use progress::{CrawlProgress, ProgressCallback, emit};

pub use queue::WorkQueue;

pub use engine::{collect_authors, crawl, crawl_account, process_repository, worker_count};
