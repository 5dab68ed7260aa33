//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any
//! extraction begins.
//!
//! ## Required Variables
//!
//! ```bash
//! export FIRESTORE_PROJECT_ID="my-project"
//! export FIRESTORE_ACCESS_TOKEN="ya29...."   # OAuth bearer token
//! ```
//!
//! ## Optional Variables
//!
//! - `BATCH_SIZE` - Page size for shops, flows and actions (default: 10)
//! - `WORKER_COUNT` - Concurrent shop workers per page (default: 5)
//! - `RETRY_MAX_ATTEMPTS` - Attempts per page fetch, including the first
//!   (default: 3)
//! - `RETRY_BACKOFF_SECONDS` - Pause between attempts (default: 2)
//! - `LINK_PATTERN` - Regex identifying link-service URLs (default: the
//!   router-link shape, see [`crate::utils::link_extractor`])
//! - `OUTPUT_PATH` - Report destination (default: `link_report.csv`)
//! - `STRICT_TEMPLATE_IDS` - Report present-but-unusable template blocks
//!   as `"malformed"` instead of `"not available"` (default: false)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use std::env;

use crate::application::services::ExtractionSettings;
use crate::domain::entities::TemplateIdPolicy;
use crate::utils::link_extractor::DEFAULT_LINK_PATTERN;
use crate::utils::retry::RetryPolicy;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    /// OAuth bearer token presented to the store on every request.
    /// Token acquisition happens outside this tool.
    pub access_token: String,
    pub batch_size: usize,
    pub worker_count: usize,
    pub retry_max_attempts: usize,
    pub retry_backoff_seconds: u64,
    pub link_pattern: String,
    pub output_path: PathBuf,
    pub strict_template_ids: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the required store credentials are missing.
    pub fn from_env() -> Result<Self> {
        let project_id =
            env::var("FIRESTORE_PROJECT_ID").context("FIRESTORE_PROJECT_ID must be set")?;
        let access_token =
            env::var("FIRESTORE_ACCESS_TOKEN").context("FIRESTORE_ACCESS_TOKEN must be set")?;

        let batch_size = env::var("BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let worker_count = env::var("WORKER_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let retry_max_attempts = env::var("RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let retry_backoff_seconds = env::var("RETRY_BACKOFF_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let link_pattern =
            env::var("LINK_PATTERN").unwrap_or_else(|_| DEFAULT_LINK_PATTERN.to_string());

        let output_path = env::var("OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("link_report.csv"));

        let strict_template_ids = env::var("STRICT_TEMPLATE_IDS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            project_id,
            access_token,
            batch_size,
            worker_count,
            retry_max_attempts,
            retry_backoff_seconds,
            link_pattern,
            output_path,
            strict_template_ids,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `batch_size` is zero or over 1000
    /// - `worker_count` is zero or over 64
    /// - `retry_max_attempts` is zero or over 10
    /// - `link_pattern` does not compile
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.project_id.is_empty() {
            anyhow::bail!("FIRESTORE_PROJECT_ID must not be empty");
        }
        if self.access_token.is_empty() {
            anyhow::bail!("FIRESTORE_ACCESS_TOKEN must not be empty");
        }

        if self.batch_size == 0 || self.batch_size > 1000 {
            anyhow::bail!(
                "BATCH_SIZE must be between 1 and 1000, got {}",
                self.batch_size
            );
        }

        if self.worker_count == 0 || self.worker_count > 64 {
            anyhow::bail!(
                "WORKER_COUNT must be between 1 and 64, got {}",
                self.worker_count
            );
        }

        if self.retry_max_attempts == 0 || self.retry_max_attempts > 10 {
            anyhow::bail!(
                "RETRY_MAX_ATTEMPTS must be between 1 and 10, got {}",
                self.retry_max_attempts
            );
        }

        regex::Regex::new(&self.link_pattern)
            .with_context(|| format!("LINK_PATTERN does not compile: '{}'", self.link_pattern))?;

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// The template-id reporting policy selected by configuration.
    pub fn template_policy(&self) -> TemplateIdPolicy {
        if self.strict_template_ids {
            TemplateIdPolicy::Strict
        } else {
            TemplateIdPolicy::Lenient
        }
    }

    /// Extraction knobs derived from this configuration.
    pub fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            batch_size: self.batch_size,
            worker_count: self.worker_count,
            retry: RetryPolicy::new(
                self.retry_max_attempts,
                Duration::from_secs(self.retry_backoff_seconds),
            ),
            template_policy: self.template_policy(),
        }
    }

    /// Prints configuration summary (without credentials).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Project: {}", self.project_id);
        tracing::info!("  Batch size: {}", self.batch_size);
        tracing::info!("  Workers: {}", self.worker_count);
        tracing::info!(
            "  Retry: {} attempts, {}s backoff",
            self.retry_max_attempts,
            self.retry_backoff_seconds
        );
        tracing::info!("  Output: {}", self.output_path.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
