//! Rendering of crawl results.

use authorship::authors::{RepositoryAuthors, aggregate, aggregate_by_repo, sorted_lines};
use authorship::RepositoryInfo;

/// Output format for `scan`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `"{email} {name}"` line per author.
    #[default]
    Text,
    /// A JSON document.
    Json,
}

/// Render the results of a crawl, flat or grouped per repository.
pub fn render(
    results: &[RepositoryInfo],
    per_repo: bool,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match (format, per_repo) {
        (OutputFormat::Text, false) => Ok(flat_text(&sorted_lines(&aggregate(results)))),
        (OutputFormat::Text, true) => Ok(grouped_text(&aggregate_by_repo(results))),
        (OutputFormat::Json, false) => {
            json_document(&sorted_lines(&aggregate(results)))
        }
        (OutputFormat::Json, true) => json_document(&aggregate_by_repo(results)),
    }
}

fn flat_text(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Each repository gets its name, a `-` underline of the same width and its
/// authors. Groups are separated by a blank line.
fn grouped_text(groups: &[RepositoryAuthors]) -> String {
    groups
        .iter()
        .map(|group| {
            let underline = "-".repeat(group.name.chars().count());
            let authors = flat_text(&sorted_lines(&group.authors));
            format!("{}\n{}\n{}", group.name, underline, authors)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_document<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
