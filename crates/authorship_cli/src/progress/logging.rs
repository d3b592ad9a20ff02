use authorship::crawl::CrawlProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: CrawlProgress) {
        match event {
            CrawlProgress::ListingRepos { account } => {
                tracing::info!(account = %account, "Listing repositories");
            }

            CrawlProgress::ListComplete {
                account,
                total,
                excluded_forks,
            } => {
                tracing::info!(account = %account, total, excluded_forks, "Listed repositories");
            }

            CrawlProgress::CrawlStarted { repos, workers } => {
                tracing::info!(repos, workers, "Crawling repositories");
            }

            CrawlProgress::RepoStarted { full_name } => {
                tracing::debug!(repo = %full_name, "Processing repository");
            }

            CrawlProgress::BranchesFound { full_name, count } => {
                tracing::debug!(repo = %full_name, branches = count, "Listed branches");
            }

            CrawlProgress::RepoComplete {
                full_name,
                commits,
                authors,
            } => {
                tracing::info!(repo = %full_name, commits, authors, "Repository done");
            }

            CrawlProgress::CrawlComplete { repos } => {
                tracing::info!(repos, "Crawl complete");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
