//! Platform-agnostic seam between the crawler and a code forge.
//!
//! This module defines the `PlatformClient` trait the crawl engine is generic
//! over, the repository and commit shapes it works with, and the shared
//! pagination walk used by every listing.
//!
//! # Example
//!
//! ```ignore
//! use authorship::platform::{PlatformClient, PlatformError};
//!
//! async fn count_branches<C: PlatformClient>(client: &C, account: &str) -> Result<usize, PlatformError> {
//!     let mut total = 0;
//!     for repo in client.list_user_repos(account).await? {
//!         total += client.list_branches(&repo).await?.len();
//!     }
//!     Ok(total)
//! }
//! ```

mod errors;
pub mod pagination;
mod types;

pub use errors::{PlatformError, Result, short_error_message};
pub use pagination::{PAGE_SIZE, PageFetch, walk_pages};
pub use types::{GitIdentity, PlatformClient, PlatformRepo, RawCommit};
