//! End-to-end crawl tests against a canned GitHub API.
//!
//! The fake API answers by URL path and honors the `since` parameter the
//! way GitHub does, so fork handling is exercised through the real client.

#![cfg(feature = "github")]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use authorship::authors::{aggregate, aggregate_by_repo, sorted_lines};
use authorship::crawl::{CrawlOptions, CrawlProgress, ProgressCallback, crawl_account};
use authorship::github::{Credentials, GitHubClient};
use authorship::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use authorship::platform::PlatformError;
use serde_json::{Value, json};
use url::Url;

/// Maximum time a crawl should take in tests. If exceeded, there's likely a hang.
const CRAWL_TIMEOUT: Duration = Duration::from_secs(10);

const FORK_CREATED_AT: &str = "2024-01-01T00:00:00Z";

#[derive(Debug, Clone)]
struct Commit {
    sha: &'static str,
    name: &'static str,
    email: &'static str,
    date: &'static str,
}

/// A canned API: repositories, their branches and per-branch commits.
#[derive(Default)]
struct FakeGitHub {
    repos: Vec<Value>,
    branches: HashMap<String, Vec<&'static str>>,
    commits: HashMap<(String, String), Vec<Commit>>,
    failing_paths: BTreeSet<String>,
    requests: Mutex<Vec<String>>,
}

impl FakeGitHub {
    fn repo(mut self, name: &str, fork: bool, branches: Vec<&'static str>) -> Self {
        self.repos.push(json!({
            "name": name,
            "full_name": format!("ann/{name}"),
            "fork": fork,
            "created_at": FORK_CREATED_AT,
            "owner": { "login": "ann" },
        }));
        self.branches.insert(format!("ann/{name}"), branches);
        self
    }

    fn commits(mut self, repo: &str, branch: &str, commits: Vec<Commit>) -> Self {
        self.commits
            .insert((format!("ann/{repo}"), branch.to_string()), commits);
        self
    }

    fn failing(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn route(&self, url: &Url) -> (u16, Value) {
        let path = url.path();
        if self.failing_paths.contains(path) {
            return (500, json!({ "message": "Server Error" }));
        }

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        // Everything fits on page one; later pages are empty.
        if query.get("page").map(String::as_str) != Some("1") {
            return (200, json!([]));
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["users", _, "repos"] => (200, Value::Array(self.repos.clone())),
            ["repos", owner, name, "branches"] => {
                let full_name = format!("{owner}/{name}");
                let branches = self.branches.get(&full_name).cloned().unwrap_or_default();
                let body = branches
                    .into_iter()
                    .map(|b| json!({ "name": b }))
                    .collect::<Vec<_>>();
                (200, Value::Array(body))
            }
            ["repos", owner, name, "commits"] => {
                let key = (
                    format!("{owner}/{name}"),
                    query.get("sha").cloned().unwrap_or_default(),
                );
                let Some(commits) = self.commits.get(&key) else {
                    return (409, json!({ "message": "Git Repository is empty." }));
                };
                let since = query.get("since");
                let body = commits
                    .iter()
                    .filter(|c| since.is_none_or(|since| c.date > since.as_str()))
                    .map(|c| {
                        json!({
                            "sha": c.sha,
                            "commit": {
                                "author": { "name": c.name, "email": c.email, "date": c.date },
                                "committer": { "name": c.name, "email": c.email, "date": c.date },
                            }
                        })
                    })
                    .collect::<Vec<_>>();
                (200, Value::Array(body))
            }
            _ => (404, json!({ "message": "Not Found" })),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeGitHub {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = Url::parse(&request.url).map_err(|e| HttpError::Transport(e.to_string()))?;
        self.requests.lock().unwrap().push(request.url.clone());

        let (status, body) = self.route(&url);
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: serde_json::to_vec(&body).expect("serializable body"),
        })
    }
}

fn commit(sha: &'static str, name: &'static str, email: &'static str, date: &'static str) -> Commit {
    Commit {
        sha,
        name,
        email,
        date,
    }
}

fn client(api: &Arc<FakeGitHub>) -> GitHubClient {
    GitHubClient::new_with_transport(
        "https://api.test",
        Credentials::new("me", "token"),
        Arc::clone(api) as Arc<dyn HttpTransport>,
    )
}

/// `alpha` is original work by Ann. `beta` is a fork: Bo committed after the
/// fork point, Upstream only before it.
fn alpha_beta() -> FakeGitHub {
    FakeGitHub::default()
        .repo("alpha", false, vec!["main"])
        .repo("beta", true, vec!["main", "dev"])
        .commits(
            "alpha",
            "main",
            vec![commit("a1", "Ann", "ann@x", "2023-05-01T00:00:00Z")],
        )
        .commits(
            "beta",
            "main",
            vec![
                commit("b2", "Bo", "bo@x", "2024-03-01T00:00:00Z"),
                commit("b1", "Upstream", "up@x", "2023-01-01T00:00:00Z"),
            ],
        )
        .commits(
            "beta",
            "dev",
            vec![
                commit("b3", "Bo", "bo@x", "2024-04-01T00:00:00Z"),
                commit("b1", "Upstream", "up@x", "2023-01-01T00:00:00Z"),
            ],
        )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crawl_account_collects_authors_and_cuts_forks() {
    let api = Arc::new(alpha_beta());

    let results = tokio::time::timeout(
        CRAWL_TIMEOUT,
        crawl_account(&client(&api), "ann", &CrawlOptions::default(), None),
    )
    .await
    .expect("crawl should not hang")
    .expect("crawl succeeds");

    assert_eq!(results.len(), 2);
    assert_eq!(
        sorted_lines(&aggregate(&results)),
        vec!["ann@x Ann", "bo@x Bo"]
    );

    let grouped = aggregate_by_repo(&results);
    let grouped: Vec<(String, Vec<String>)> = grouped
        .iter()
        .map(|g| (g.name.clone(), sorted_lines(&g.authors)))
        .collect();
    assert_eq!(
        grouped,
        vec![
            ("alpha".to_string(), vec!["ann@x Ann".to_string()]),
            ("beta".to_string(), vec!["bo@x Bo".to_string()]),
        ]
    );

    // The fork cutoff is sent on every commit page of the fork and never for
    // the original repository.
    let requests = api.requests();
    assert!(
        requests
            .iter()
            .filter(|u| u.contains("/repos/ann/beta/commits"))
            .all(|u| u.contains("since=2024-01-01T00%3A00%3A00Z"))
    );
    assert!(
        requests
            .iter()
            .filter(|u| u.contains("/repos/ann/alpha/commits"))
            .all(|u| !u.contains("since="))
    );
}

#[tokio::test]
async fn test_crawl_account_without_forks() {
    let api = Arc::new(alpha_beta());
    let options = CrawlOptions {
        exclude_forks: true,
        ..CrawlOptions::default()
    };

    let results = crawl_account(&client(&api), "ann", &options, None)
        .await
        .expect("crawl succeeds");

    assert_eq!(results.len(), 1);
    assert_eq!(sorted_lines(&aggregate(&results)), vec!["ann@x Ann"]);
    assert!(!api.requests().iter().any(|u| u.contains("/repos/ann/beta/")));
}

#[tokio::test]
async fn test_empty_repository_contributes_no_authors() {
    let api = Arc::new(
        FakeGitHub::default()
            .repo("alpha", false, vec!["main"])
            .repo("empty", false, vec!["main"])
            .commits(
                "alpha",
                "main",
                vec![commit("a1", "Ann", "ann@x", "2023-05-01T00:00:00Z")],
            ),
    );

    let results = crawl_account(&client(&api), "ann", &CrawlOptions::default(), None)
        .await
        .expect("an empty repository is not an error");

    let grouped = aggregate_by_repo(&results);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[1].name, "empty");
    assert!(grouped[1].authors.is_empty());
}

#[tokio::test]
async fn test_progress_events_cover_the_whole_crawl() {
    let api = Arc::new(alpha_beta());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let callback: ProgressCallback = Box::new(move |event| sink.lock().unwrap().push(event));

    crawl_account(
        &client(&api),
        "ann",
        &CrawlOptions::default(),
        Some(Arc::new(callback)),
    )
    .await
    .expect("crawl succeeds");

    let events = events.lock().unwrap();
    assert_eq!(
        events.first(),
        Some(&CrawlProgress::ListingRepos {
            account: "ann".to_string()
        })
    );
    assert_eq!(
        events.last(),
        Some(&CrawlProgress::CrawlComplete { repos: 2 })
    );
    assert!(events.contains(&CrawlProgress::BranchesFound {
        full_name: "ann/beta".to_string(),
        count: 2,
    }));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, CrawlProgress::RepoComplete { .. }))
            .count(),
        2
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_error_fails_the_whole_crawl() {
    let api = Arc::new(alpha_beta().failing("/repos/ann/beta/branches"));

    let err = tokio::time::timeout(
        CRAWL_TIMEOUT,
        crawl_account(&client(&api), "ann", &CrawlOptions::default(), None),
    )
    .await
    .expect("crawl should not hang")
    .expect_err("a 500 aborts the crawl");

    assert!(matches!(err, PlatformError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let api = Arc::new(FakeGitHub::default());

    // No account route matches a path with an extra segment.
    let err = crawl_account(&client(&api), "ann/extra", &CrawlOptions::default(), None)
        .await
        .expect_err("unknown route");

    assert!(matches!(err, PlatformError::NotFound { .. }));
}
