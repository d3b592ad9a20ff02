//! Concurrent crawl engine.
//!
//! The engine is generic over `PlatformClient`. A fixed number of workers
//! drain a shared [`WorkQueue`]; each worker fully processes the repository
//! it claimed (branches, then commits per branch, then authors) and sends
//! the finished [`RepositoryInfo`] to the collector in [`crawl`].
//!
//! # Example
//!
//! ```ignore
//! use authorship::authors::aggregate;
//! use authorship::crawl::{CrawlOptions, crawl_account};
//!
//! let results = crawl_account(&client, "octocat", &CrawlOptions::default(), None).await?;
//! let everyone = aggregate(&results);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::progress::{CrawlProgress, ProgressCallback, emit};
use super::queue::WorkQueue;
use super::types::{CrawlOptions, IdentitySource};
use crate::authors::{CommitAuthor, RepositoryInfo};
use crate::platform::{PlatformClient, PlatformError, PlatformRepo, RawCommit};

/// Number of workers for a crawl: never more than there are repositories,
/// and at least one when there is work.
#[inline]
pub fn worker_count(repos: usize, max_concurrency: usize) -> usize {
    repos.min(max_concurrency.max(1))
}

/// Derive the distinct author set from raw commits.
///
/// Commits without the selected identity are skipped.
pub fn collect_authors(commits: &[RawCommit], options: &CrawlOptions) -> HashSet<CommitAuthor> {
    commits
        .iter()
        .filter_map(|commit| match options.identity {
            IdentitySource::Author => commit.author.as_ref(),
            IdentitySource::Committer => commit.committer.as_ref(),
        })
        .map(|identity| CommitAuthor::new(&identity.name, &identity.email))
        .filter(|author| !(options.drop_noreply && author.is_noreply()))
        .collect()
}

/// Process one repository: list its branches, list the commits of every
/// branch, and reduce them to an author set.
///
/// Commits shared by several branches are fetched once per branch; only the
/// resulting authors are deduplicated.
#[tracing::instrument(skip_all, fields(repo = %repo.full_name))]
pub async fn process_repository<C: PlatformClient + ?Sized>(
    client: &C,
    repo: &PlatformRepo,
    options: &CrawlOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<RepositoryInfo, PlatformError> {
    let branches = client.list_branches(repo).await?;

    emit(
        on_progress,
        CrawlProgress::BranchesFound {
            full_name: repo.full_name.clone(),
            count: branches.len(),
        },
    );

    let mut commits: Vec<RawCommit> = Vec::new();
    for branch in &branches {
        let branch_commits = client.list_commits(repo, branch).await?;
        tracing::debug!(branch = %branch, commits = branch_commits.len(), "Listed branch commits");
        commits.extend(branch_commits);
    }

    let commit_authors = collect_authors(&commits, options);

    tracing::info!(
        branches = branches.len(),
        commits = commits.len(),
        authors = commit_authors.len(),
        "Processed repository"
    );

    emit(
        on_progress,
        CrawlProgress::RepoComplete {
            full_name: repo.full_name.clone(),
            commits: commits.len(),
            authors: commit_authors.len(),
        },
    );

    Ok(RepositoryInfo {
        name: repo.name.clone(),
        owner: repo.owner.clone(),
        commit_authors,
    })
}

/// Worker loop: claim, process, report, until the queue is drained.
#[tracing::instrument(skip_all, fields(worker = worker))]
async fn run_worker<C: PlatformClient + ?Sized>(
    worker: usize,
    client: &C,
    queue: &WorkQueue,
    results: &mpsc::UnboundedSender<RepositoryInfo>,
    options: &CrawlOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<usize, PlatformError> {
    let mut processed = 0usize;

    while let Some(repo) = queue.claim() {
        emit(
            on_progress,
            CrawlProgress::RepoStarted {
                full_name: repo.full_name.clone(),
            },
        );

        let info = process_repository(client, &repo, options, on_progress).await?;

        results
            .send(info)
            .map_err(|_| PlatformError::internal("Crawl result channel closed unexpectedly"))?;
        processed += 1;
    }

    tracing::debug!(processed, "Work queue drained");
    Ok(processed)
}

/// Crawl a set of repositories with bounded concurrency.
///
/// Spawns `min(repos.len(), options.concurrency)` workers and waits for all
/// of them. The first error aborts every other worker and is returned;
/// results of repositories that already finished are discarded. The order of
/// the returned entries is unspecified.
#[tracing::instrument(skip_all, fields(repos = repos.len(), concurrency = options.concurrency))]
pub async fn crawl<C: PlatformClient + Clone + 'static>(
    client: &C,
    repos: Vec<PlatformRepo>,
    options: &CrawlOptions,
    on_progress: Option<Arc<ProgressCallback>>,
) -> Result<Vec<RepositoryInfo>, PlatformError> {
    let total = repos.len();
    let workers = worker_count(total, options.concurrency);

    if workers == 0 {
        emit(
            on_progress.as_deref(),
            CrawlProgress::CrawlComplete { repos: 0 },
        );
        return Ok(Vec::new());
    }

    emit(
        on_progress.as_deref(),
        CrawlProgress::CrawlStarted {
            repos: total,
            workers,
        },
    );

    let queue = Arc::new(WorkQueue::new(repos));
    let (tx, mut rx) = mpsc::unbounded_channel::<RepositoryInfo>();
    let mut join_set = JoinSet::new();

    for worker in 0..workers {
        let client = client.clone();
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let options = options.clone();
        let on_progress = on_progress.clone();

        join_set.spawn(async move {
            run_worker(
                worker,
                &client,
                &queue,
                &tx,
                &options,
                on_progress.as_deref(),
            )
            .await
        });
    }

    // Only the workers hold senders now; the channel closes when they finish.
    drop(tx);

    while let Some(joined) = join_set.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(PlatformError::internal(format!(
                "Crawl worker panicked: {}",
                e
            ))),
        };

        if let Err(e) = outcome {
            tracing::error!(error = %e, "Crawl worker failed, aborting remaining workers");
            join_set.abort_all();
            return Err(e);
        }
    }

    let mut results = Vec::with_capacity(total);
    while let Some(info) = rx.recv().await {
        results.push(info);
    }

    tracing::info!(processed = results.len(), "Crawl complete");

    emit(
        on_progress.as_deref(),
        CrawlProgress::CrawlComplete {
            repos: results.len(),
        },
    );

    Ok(results)
}

/// List an account's repositories and crawl them.
///
/// With `exclude_forks`, forks are dropped here; otherwise they are crawled
/// with their history cut at the fork point.
#[tracing::instrument(skip(client, options, on_progress), fields(platform = client.platform_name()))]
pub async fn crawl_account<C: PlatformClient + Clone + 'static>(
    client: &C,
    account: &str,
    options: &CrawlOptions,
    on_progress: Option<Arc<ProgressCallback>>,
) -> Result<Vec<RepositoryInfo>, PlatformError> {
    emit(
        on_progress.as_deref(),
        CrawlProgress::ListingRepos {
            account: account.to_string(),
        },
    );

    let mut repos = client.list_user_repos(account).await?;

    let listed = repos.len();
    if options.exclude_forks {
        repos.retain(|repo| !repo.is_fork);
    }
    let excluded_forks = listed - repos.len();

    tracing::info!(total = repos.len(), excluded_forks, "Listed repositories");

    emit(
        on_progress.as_deref(),
        CrawlProgress::ListComplete {
            account: account.to_string(),
            total: repos.len(),
            excluded_forks,
        },
    );

    crawl(client, repos, options, on_progress).await
}
