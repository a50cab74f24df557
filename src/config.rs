use std::path::PathBuf;

use crate::cli::Cli;
use crate::retry::RetryConfig;

/// Basic-auth credentials for the member area.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration, built once from the CLI and passed by
/// reference into every component.
#[derive(Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub zip_dir: PathBuf,
    pub txt_dir: PathBuf,
    pub base_url: String,
    /// Empty means every category.
    pub categories: Vec<String>,
    pub retry: RetryConfig,
    pub timeout_secs: u64,
    pub skip_masters: bool,
    pub dry_run: bool,
    pub no_progress_bar: bool,
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let password = match cli.password {
            Some(p) => p,
            None => tokio::task::block_in_place(|| rpassword::prompt_password("JRDB password: "))?,
        };

        Ok(Self {
            credentials: Credentials {
                user: cli.user,
                password,
            },
            zip_dir: expand_tilde(&cli.zip_dir),
            txt_dir: expand_tilde(&cli.txt_dir),
            base_url: cli.base_url.trim_end_matches('/').to_string(),
            categories: cli.categories,
            retry: RetryConfig {
                max_attempts: cli.max_attempts,
                base_delay_secs: cli.retry_delay,
            },
            timeout_secs: cli.timeout,
            skip_masters: cli.skip_masters,
            dry_run: cli.dry_run,
            no_progress_bar: cli.no_progress_bar,
        })
    }

    /// Whether the `--category` filter admits `name`.
    pub fn wants_category(&self, name: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == name)
    }
}

/// Minimal config for target-table tests.
#[cfg(test)]
pub fn test_config(zip_dir: &str, txt_dir: &str, base_url: &str) -> Config {
    Config {
        credentials: Credentials {
            user: "member".to_string(),
            password: "secret".to_string(),
        },
        zip_dir: PathBuf::from(zip_dir),
        txt_dir: PathBuf::from(txt_dir),
        base_url: base_url.to_string(),
        categories: Vec::new(),
        retry: RetryConfig::default(),
        timeout_secs: 30,
        skip_masters: false,
        dry_run: false,
        no_progress_bar: true,
    }
}
