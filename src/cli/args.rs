//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::time::Duration;

use clap::Parser;

use crate::config::Config;
use crate::consts::REFRESH_INTERVAL;
use crate::error::AppError;

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "lockbeat")]
#[command(about = "Keep-alive heartbeat client for admin record edit locks", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Page path to refresh the lock for (e.g. /admin/blog/post/7/change/)
    #[arg(short, long, global = true)]
    pub(crate) path: Option<String>,

    /// CSRF token forwarded on every refresh request
    #[arg(short, long, global = true)]
    pub(crate) token: Option<String>,

    /// Server the page path is joined to (e.g. http://127.0.0.1:8000)
    #[arg(short, long, global = true)]
    pub(crate) base_url: Option<String>,

    /// Milliseconds between refresh requests
    #[arg(short, long, global = true, value_name = "MS")]
    pub(crate) interval_ms: Option<u64>,

    /// Stop after this many requests (runs until interrupted when absent)
    #[arg(short, long, global = true, value_name = "N")]
    pub(crate) max_ticks: Option<u64>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Enable debug output (per-tick diagnostics on stderr)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.json && config.json {
            self.json = true;
        }

        if self.base_url.is_none() {
            self.base_url = config.base_url.clone();
        }
        if self.interval_ms.is_none() {
            self.interval_ms = config.interval_ms;
        }

        self
    }

    /// The tick period: 5 seconds unless overridden.
    pub(crate) fn interval(&self) -> Result<Duration, AppError> {
        match self.interval_ms {
            None => Ok(REFRESH_INTERVAL),
            Some(0) => Err(AppError::InvalidInterval {
                input: "0".to_string(),
            }),
            Some(ms) => Ok(Duration::from_millis(ms)),
        }
    }

    /// Validated base URL with any trailing slash removed, so joining
    /// it to an absolute page path yields a single slash.
    pub(crate) fn normalized_base_url(&self) -> Result<String, AppError> {
        let raw = self.base_url.as_deref().unwrap_or_default();
        if !raw.starts_with("http://") && !raw.starts_with("https://") {
            return Err(AppError::InvalidBaseUrl {
                input: raw.to_string(),
            });
        }
        Ok(raw.trim_end_matches('/').to_string())
    }
}
