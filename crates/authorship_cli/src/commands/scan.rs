use std::sync::Arc;
use std::time::Duration;

use authorship::crawl::{CrawlOptions, IdentitySource, crawl_account};
use authorship::github::{Credentials, GitHubClient};
use authorship::platform::short_error_message;
use clap::CommandFactory;
use clap::error::ErrorKind;

use crate::config::Config;
use crate::output;
use crate::progress::ProgressReporter;
use crate::{Cli, ScanArgs};

pub(crate) async fn handle_scan(
    args: ScanArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = match resolve_credentials(&args, config) {
        Ok(credentials) => credentials,
        Err(message) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, message)
            .exit(),
    };

    let host = args.host.clone().unwrap_or_else(|| config.github_host());
    let options = crawl_options(&args, config);
    let client = GitHubClient::with_timeout(
        &host,
        credentials,
        Duration::from_secs(config.crawl.timeout_secs),
    )?;

    tracing::debug!(
        host = %client.host(),
        account = %args.account,
        concurrency = options.concurrency,
        "Starting scan"
    );

    let reporter = Arc::new(ProgressReporter::new());
    let outcome = crawl_account(
        &client,
        &args.account,
        &options,
        Some(reporter.as_callback()),
    )
    .await;

    let results = match outcome {
        Ok(results) => {
            reporter.finish();
            results
        }
        Err(e) => {
            reporter.clear();
            tracing::error!(account = %args.account, error = %short_error_message(&e), "Scan failed");
            return Err(e.into());
        }
    };

    print!("{}", output::render(&results, args.per_repo, args.output)?);
    Ok(())
}

/// Flags win over configuration.
fn resolve_credentials(args: &ScanArgs, config: &Config) -> Result<Credentials, String> {
    let username = args
        .username
        .clone()
        .or_else(|| config.github.username.clone())
        .ok_or_else(|| {
            "No GitHub username given. Pass --username or set AUTHORSHIP_GITHUB__USERNAME."
                .to_string()
        })?;
    let token = args
        .token
        .clone()
        .or_else(|| config.github.token.clone())
        .ok_or_else(|| {
            "No GitHub token given. Pass --token or set AUTHORSHIP_GITHUB__TOKEN.".to_string()
        })?;

    Ok(Credentials::new(username, token))
}

fn crawl_options(args: &ScanArgs, config: &Config) -> CrawlOptions {
    CrawlOptions {
        concurrency: args.num_max_concurrent.unwrap_or(config.crawl.concurrency),
        identity: if args.committer {
            IdentitySource::Committer
        } else {
            config.crawl.identity
        },
        exclude_forks: args.exclude_forks || config.crawl.exclude_forks,
        drop_noreply: args.drop_noreply || config.crawl.drop_noreply,
    }
}
