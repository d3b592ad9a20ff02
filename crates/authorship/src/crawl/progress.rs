//! Progress reporting types for crawl operations.
//!
//! Events are emitted from the caller's task and from every worker, so the
//! callback must be `Send + Sync`.

/// Progress events emitted during a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CrawlProgress {
    /// Starting to list an account's repositories.
    ListingRepos {
        /// The account whose repositories are listed.
        account: String,
    },

    /// Finished listing repositories.
    ListComplete {
        /// The account that was listed.
        account: String,
        /// Number of repositories that will be crawled.
        total: usize,
        /// Number of forks dropped at listing time.
        excluded_forks: usize,
    },

    /// Workers are about to start.
    CrawlStarted {
        /// Number of repositories in the work queue.
        repos: usize,
        /// Number of workers spawned.
        workers: usize,
    },

    /// A worker claimed a repository.
    RepoStarted {
        /// Repository full name (owner/name).
        full_name: String,
    },

    /// Branches of a repository were listed.
    BranchesFound {
        /// Repository full name (owner/name).
        full_name: String,
        /// Number of distinct branches.
        count: usize,
    },

    /// A repository was fully processed.
    RepoComplete {
        /// Repository full name (owner/name).
        full_name: String,
        /// Commits seen across all branches (not deduplicated).
        commits: usize,
        /// Distinct authors found.
        authors: usize,
    },

    /// Every worker finished.
    CrawlComplete {
        /// Number of repositories processed.
        repos: usize,
    },
}

/// Callback type for progress reporting.
pub type ProgressCallback = Box<dyn Fn(CrawlProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
///
/// # Example
///
/// ```ignore
/// emit(on_progress, CrawlProgress::CrawlComplete { repos: 3 });
/// ```
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: CrawlProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
