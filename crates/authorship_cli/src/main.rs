//! Authorship CLI - list everyone who authored commits in an account's repositories.

mod commands;
mod config;
mod output;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "authorship")]
#[command(version)]
#[command(about = "List the commit authors of every repository an account owns")]
#[command(
    long_about = "Authorship walks every branch of every repository owned by a GitHub account \
and prints the distinct commit authors, either for the whole account or per repository. \
Forks only contribute commits made after they were forked."
)]
#[command(after_long_help = r#"EXAMPLES
    List every author across an account:
        $ authorship scan octocat -u me -t ghp_...

    Group authors by repository:
        $ authorship scan octocat --per-repo

    Use committer identities and skip forks, as JSON:
        $ authorship scan octocat --committer --exclude-forks -o json

    Generate shell completions:
        $ authorship completions bash > ~/.local/share/bash-completion/completions/authorship

CONFIGURATION
    Authorship reads configuration from:
      1. ~/.config/authorship/config.toml (or $XDG_CONFIG_HOME/authorship/config.toml)
      2. ./authorship.toml
      3. Environment variables (AUTHORSHIP_* prefix, e.g., AUTHORSHIP_GITHUB__TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    AUTHORSHIP_GITHUB__HOST          GitHub API root (default: https://api.github.com)
    AUTHORSHIP_GITHUB__USERNAME      GitHub username for basic authentication
    AUTHORSHIP_GITHUB__TOKEN         GitHub personal access token
    AUTHORSHIP_CRAWL__CONCURRENCY    Repositories processed at once (default: 5)
    RUST_LOG                         Log filter when output is not a terminal
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the commit authors of an account's repositories
    Scan(ScanArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct ScanArgs {
    /// Account whose repositories are scanned
    account: String,

    /// GitHub username for authentication (default from config)
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// GitHub personal access token (default from config)
    #[arg(short = 't', long)]
    token: Option<String>,

    /// Maximum repositories processed concurrently (default from config or 5)
    #[arg(short = 'n', long = "num-max-concurrent")]
    num_max_concurrent: Option<usize>,

    /// Print authors grouped per repository
    #[arg(short = 'p', long)]
    per_repo: bool,

    /// Collect committer identities instead of authors
    #[arg(long)]
    committer: bool,

    /// Skip forked repositories entirely
    #[arg(long)]
    exclude_forks: bool,

    /// Drop GitHub's noreply@github.com placeholder identity
    #[arg(long)]
    drop_noreply: bool,

    /// GitHub API root, for GitHub Enterprise (default from config)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when stdout is not a terminal. Logs go to
    // stderr so they never mix with the author list.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("authorship=info,authorship_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            let config = config::Config::load();
            commands::scan::handle_scan(args, &config).await?;
        }
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell)?;
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output)?;
        }
    }

    Ok(())
}
