use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Applications Dashboard - terminal client for the applications backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Base URL of the applications backend
    #[arg(short = 'u', long, env = "DASHBOARD_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// SQLite file holding the hidden application ids
    #[arg(short = 's', long, env = "DASHBOARD_STORE_FILE")]
    pub store_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// HTTP connect timeout in seconds
    #[arg(long, env = "HTTP_CONNECT_TIMEOUT", default_value = "10")]
    pub http_connect_timeout: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value = "30")]
    pub http_timeout: u64,

    /// Print the visible applications once and exit
    #[arg(long)]
    pub snapshot: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    // Backend
    pub api_url: String,

    // Storage
    pub store_file: PathBuf,

    // HTTP client
    pub http_connect_timeout: u64,
    pub http_request_timeout: u64,

    // Logging
    pub log_level: String,

    // Mode
    pub snapshot: bool,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let args = CliArgs::parse();
        Self::from_args(args)
    }

    pub fn from_args(args: CliArgs) -> Result<Self> {
        let store_file = match args.store_file {
            Some(path) => expand_tilde(&path),
            None => default_store_file()
                .context("No data directory found (use -s or set DASHBOARD_STORE_FILE)")?,
        };

        Ok(Config {
            api_url: args.api_url.trim_end_matches('/').to_string(),
            store_file,
            http_connect_timeout: args.http_connect_timeout,
            http_request_timeout: args.http_timeout,
            log_level: args.log_level,
            snapshot: args.snapshot,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("DASHBOARD_API_URL is not a valid URL: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "DASHBOARD_API_URL must use http or https: {}",
                self.api_url
            );
        }

        if self.http_connect_timeout == 0 || self.http_request_timeout == 0 {
            anyhow::bail!("HTTP timeouts must be at least one second");
        }

        Ok(())
    }
}

/// `<data dir>/applications-dashboard/storage.sqlite3`
fn default_store_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("applications-dashboard").join("storage.sqlite3"))
}

/// Expand tilde (~) in file paths to user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
