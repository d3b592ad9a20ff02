//! Commit author identities and their aggregation across repositories.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Placeholder email GitHub records for web-flow commits.
pub const NOREPLY_EMAIL: &str = "noreply@github.com";

/// A commit identity. Two authors are the same iff name and email match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl CommitAuthor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Whether this is GitHub's placeholder identity rather than a person.
    pub fn is_noreply(&self) -> bool {
        self.email.eq_ignore_ascii_case(NOREPLY_EMAIL)
    }
}

impl fmt::Display for CommitAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.email, self.name)
    }
}

/// The authors found in one repository.
///
/// Built once by the crawl worker that processed the repository and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub name: String,
    pub owner: String,
    pub commit_authors: HashSet<CommitAuthor>,
}

impl RepositoryInfo {
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One entry of the grouped view: a repository and its sorted authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryAuthors {
    #[serde(rename = "repository")]
    pub name: String,
    pub owner: String,
    pub authors: Vec<CommitAuthor>,
}

/// Union of the authors of every repository.
pub fn aggregate(results: &[RepositoryInfo]) -> HashSet<CommitAuthor> {
    results
        .iter()
        .flat_map(|info| info.commit_authors.iter().cloned())
        .collect()
}

/// Per-repository view, authors in lexicographic order of their string form.
///
/// Crawl order is not deterministic, so groups are ordered by owner then name.
pub fn aggregate_by_repo(results: &[RepositoryInfo]) -> Vec<RepositoryAuthors> {
    let mut groups: Vec<RepositoryAuthors> = results
        .iter()
        .map(|info| {
            let mut authors: Vec<CommitAuthor> = info.commit_authors.iter().cloned().collect();
            authors.sort_by_cached_key(|a| a.to_string());
            RepositoryAuthors {
                name: info.name.clone(),
                owner: info.owner.clone(),
                authors,
            }
        })
        .collect();

    groups.sort_by(|a, b| (&a.owner, &a.name).cmp(&(&b.owner, &b.name)));
    groups
}

/// Render authors as `"{email} {name}"` lines, sorted.
pub fn sorted_lines<'a>(authors: impl IntoIterator<Item = &'a CommitAuthor>) -> Vec<String> {
    let mut lines: Vec<String> = authors.into_iter().map(|a| a.to_string()).collect();
    lines.sort();
    lines
}
