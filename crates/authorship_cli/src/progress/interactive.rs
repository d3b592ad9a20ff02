use std::sync::Mutex;
use std::time::Duration;

use authorship::crawl::CrawlProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Consolidated progress state to avoid multiple mutex locks.
#[derive(Default)]
struct ProgressState {
    /// Spinner shown while repositories are listed.
    list_bar: Option<ProgressBar>,
    /// One tick per processed repository.
    crawl_bar: Option<ProgressBar>,
}

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    #[cfg(test)]
    pub fn hidden() -> Self {
        Self::with_multi(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    fn with_multi(multi: MultiProgress) -> Self {
        Self {
            multi,
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn handle(&self, event: CrawlProgress) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            CrawlProgress::ListingRepos { account } => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_prefix(format!("{:12}", account));
                pb.set_message("Listing repositories...");
                state.list_bar = Some(pb);
            }

            CrawlProgress::ListComplete {
                total,
                excluded_forks,
                ..
            } => {
                if let Some(ref pb) = state.list_bar {
                    let msg = if excluded_forks > 0 {
                        format!("✓ {} repos ({} forks skipped)", total, excluded_forks)
                    } else {
                        format!("✓ {} repos", total)
                    };
                    pb.finish_with_message(msg);
                }
            }

            CrawlProgress::CrawlStarted { repos, workers } => {
                let pb = self.multi.add(ProgressBar::new(repos as u64));
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{:12}", "Crawling"));
                pb.set_message(format!("{} workers", workers));
                state.crawl_bar = Some(pb);
            }

            CrawlProgress::RepoStarted { full_name } => {
                if let Some(ref pb) = state.crawl_bar {
                    pb.set_message(full_name);
                }
            }

            CrawlProgress::BranchesFound { full_name, count } => {
                if let Some(ref pb) = state.crawl_bar {
                    pb.set_message(format!("{} ({} branches)", full_name, count));
                }
            }

            CrawlProgress::RepoComplete { .. } => {
                if let Some(ref pb) = state.crawl_bar {
                    pb.inc(1);
                }
            }

            CrawlProgress::CrawlComplete { repos } => {
                if let Some(ref pb) = state.crawl_bar {
                    pb.finish_with_message(format!("✓ {} repos", repos));
                }
            }

            _ => {}
        }
    }

    #[cfg(test)]
    pub fn completed(&self) -> u64 {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.crawl_bar.as_ref().map_or(0, |pb| pb.position())
    }

    pub fn clear(&self) {
        self.multi.clear().ok();
    }

    pub fn finish(&self) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        for pb in [&state.list_bar, &state.crawl_bar].into_iter().flatten() {
            if !pb.is_finished() {
                pb.finish();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {msg}")
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_bar_counts_completed_repositories() {
        let reporter = InteractiveReporter::hidden();
        reporter.handle(CrawlProgress::ListingRepos {
            account: "ann".to_string(),
        });
        reporter.handle(CrawlProgress::ListComplete {
            account: "ann".to_string(),
            total: 3,
            excluded_forks: 1,
        });
        reporter.handle(CrawlProgress::CrawlStarted {
            repos: 3,
            workers: 3,
        });
        for name in ["a", "b"] {
            reporter.handle(CrawlProgress::RepoStarted {
                full_name: format!("ann/{name}"),
            });
            reporter.handle(CrawlProgress::RepoComplete {
                full_name: format!("ann/{name}"),
                commits: 1,
                authors: 1,
            });
        }

        assert_eq!(reporter.completed(), 2);
        reporter.finish();
    }

    #[test]
    fn test_events_before_crawl_start_are_ignored() {
        let reporter = InteractiveReporter::hidden();
        reporter.handle(CrawlProgress::RepoComplete {
            full_name: "ann/a".to_string(),
            commits: 1,
            authors: 1,
        });
        reporter.handle(CrawlProgress::CrawlComplete { repos: 0 });
        assert_eq!(reporter.completed(), 0);
    }
}
