//! Configuration file support for authorship.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `AUTHORSHIP_`, sections separated by `__`,
//!    e.g. `AUTHORSHIP_GITHUB__TOKEN` or `AUTHORSHIP_CRAWL__EXCLUDE_FORKS`)
//! 3. Config file (./authorship.toml, then ~/.config/authorship/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! host = "https://api.github.com"  # or a GitHub Enterprise API root
//! username = "me"
//! token = "ghp_..."  # or use AUTHORSHIP_GITHUB__TOKEN env var
//!
//! [crawl]
//! concurrency = 5
//! identity = "author"  # or "committer"
//! exclude_forks = false
//! drop_noreply = false
//! timeout_secs = 30
//! ```

use std::path::PathBuf;

use authorship::crawl::{DEFAULT_CONCURRENCY, IdentitySource};
use authorship::github::{DEFAULT_TIMEOUT, GITHUB_API_HOST};
use config::builder::DefaultState;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Prefix of the environment variables read into the configuration.
const ENV_PREFIX: &str = "AUTHORSHIP";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub connection and credentials.
    pub github: GitHubConfig,
    /// Default crawl options.
    pub crawl: CrawlConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API root. Defaults to the public GitHub API.
    pub host: Option<String>,
    /// Login used for basic authentication.
    pub username: Option<String>,
    /// Personal access token used as the basic-auth password.
    pub token: Option<String>,
}

/// Default crawl options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of repositories processed at the same time.
    pub concurrency: usize,
    /// Which commit identity counts as the author.
    pub identity: IdentitySource,
    /// Skip forks entirely.
    pub exclude_forks: bool,
    /// Drop the `noreply@github.com` placeholder identity.
    pub drop_noreply: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            identity: IdentitySource::Author,
            exclude_forks: false,
            drop_noreply: false,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/authorship/config.toml)
    /// 3. Local config file (./authorship.toml)
    /// 4. Environment variables with AUTHORSHIP_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("authorship.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./authorship.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        Self::from_builder(builder.add_source(Self::environment()))
    }

    /// `AUTHORSHIP_GITHUB__TOKEN` -> `github.token`.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Build and deserialize, falling back to defaults on any error.
    fn from_builder(builder: config::ConfigBuilder<DefaultState>) -> Self {
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub API root.
    pub fn github_host(&self) -> String {
        self.github
            .host
            .clone()
            .unwrap_or_else(|| GITHUB_API_HOST.to_string())
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "authorship").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml_content: &str) -> Config {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        settings.try_deserialize().unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.host.is_none());
        assert!(config.github.username.is_none());
        assert!(config.github.token.is_none());
        assert_eq!(config.crawl.concurrency, 5);
        assert_eq!(config.crawl.identity, IdentitySource::Author);
        assert!(!config.crawl.exclude_forks);
        assert!(!config.crawl.drop_noreply);
        assert_eq!(config.crawl.timeout_secs, 30);
    }

    #[test]
    fn test_github_host_default() {
        assert_eq!(Config::default().github_host(), "https://api.github.com");
    }

    #[test]
    fn test_full_config_parsing() {
        let config = from_toml(
            r#"
            [github]
            host = "https://ghe.example.com/api/v3"
            username = "me"
            token = "ghp_test123"

            [crawl]
            concurrency = 8
            identity = "committer"
            exclude_forks = true
            drop_noreply = true
            timeout_secs = 10
        "#,
        );

        assert_eq!(config.github_host(), "https://ghe.example.com/api/v3");
        assert_eq!(config.github.username, Some("me".to_string()));
        assert_eq!(config.github.token, Some("ghp_test123".to_string()));
        assert_eq!(config.crawl.concurrency, 8);
        assert_eq!(config.crawl.identity, IdentitySource::Committer);
        assert!(config.crawl.exclude_forks);
        assert!(config.crawl.drop_noreply);
        assert_eq!(config.crawl.timeout_secs, 10);
    }

    #[test]
    fn test_config_builder_partial_override() {
        let config = from_toml(
            r#"
            [crawl]
            concurrency = 2
        "#,
        );

        assert_eq!(config.crawl.concurrency, 2);
        assert_eq!(config.crawl.identity, IdentitySource::Author);
        assert_eq!(config.crawl.timeout_secs, 30);
    }

    #[test]
    fn test_config_merging_order() {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                "[crawl]\nconcurrency = 9\ndrop_noreply = true",
                FileFormat::Toml,
            ))
            .add_source(config::File::from_str(
                "[crawl]\nconcurrency = 3",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.crawl.concurrency, 3);
        assert!(config.crawl.drop_noreply);
    }

    #[test]
    fn test_environment_overrides_file() {
        let env = config::Map::from([
            ("AUTHORSHIP_GITHUB__TOKEN".to_string(), "from-env".to_string()),
            ("AUTHORSHIP_CRAWL__EXCLUDE_FORKS".to_string(), "true".to_string()),
        ]);
        let builder = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                "[github]\ntoken = \"from-file\"\nusername = \"me\"",
                FileFormat::Toml,
            ))
            .add_source(Config::environment().source(Some(env)));

        let config = Config::from_builder(builder);
        assert_eq!(config.github.token, Some("from-env".to_string()));
        assert_eq!(config.github.username, Some("me".to_string()));
        assert!(config.crawl.exclude_forks);
    }

    #[test]
    fn test_invalid_identity_falls_back_to_defaults() {
        let builder = ConfigBuilder::builder().add_source(config::File::from_str(
            "[crawl]\nidentity = \"reviewer\"",
            FileFormat::Toml,
        ));

        let config = Config::from_builder(builder);
        assert_eq!(config.crawl.identity, IdentitySource::Author);
    }

    #[test]
    fn test_config_invalid_toml() {
        let result = ConfigBuilder::builder()
            .add_source(config::File::from_str("[crawl\nconcurrency = 5", FileFormat::Toml))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let config = from_toml(
            r#"
            [crawl]
            concurrency = 4
            unknown_field = "should be ignored"
        "#,
        );
        assert_eq!(config.crawl.concurrency, 4);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = Config::default_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains("authorship"));
        }
    }
}
