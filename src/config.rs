//! Configuration types for artvee-dl

use crate::error::{Error, Result};
use crate::types::{Category, ImageSize};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default catalog base URL
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://artvee.com";

/// Listing page size the catalog is queried with (`?per_page=70`)
pub const ITEMS_PER_PAGE: u32 = 70;

/// Inclusive bounds for the worker pool size
pub const WORKER_THREADS_RANGE: std::ops::RangeInclusive<usize> = 1..=16;

/// Main configuration for [`ArtveeScraper`](crate::scraper::ArtveeScraper)
///
/// All fields carry serde defaults, so a deserialized empty document yields a
/// working configuration that scrapes every category at standard resolution
/// with three workers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Number of concurrent worker tasks (1-16, default: 3)
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Categories to scrape; empty means all of them.
    ///
    /// Ignored entirely when `page_urls` is non-empty - explicit URLs take
    /// precedence over category enumeration.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Explicit listing base URLs to scrape instead of categories
    #[serde(default)]
    pub page_urls: Vec<String>,

    /// Which image resolution tier to download (default: standard)
    #[serde(default)]
    pub image_size: ImageSize,

    /// Override for the download-link prefix match (default: the selected
    /// tier's canonical CDN prefix). Overridable so tests can point image
    /// downloads at a local mock server.
    #[serde(default)]
    pub image_url_prefix: Option<String>,

    /// Overwrite files that already exist at the writer's destination
    /// (interpreted by writers, not by the scrape pipeline)
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Base URL of the catalog site (default: `https://artvee.com`).
    /// Overridable so tests can point the scraper at a local mock server.
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// HTTP retry behavior for transient server errors
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            categories: Vec::new(),
            page_urls: Vec::new(),
            image_size: ImageSize::default(),
            image_url_prefix: None,
            overwrite_existing: false,
            catalog_base_url: default_catalog_base_url(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `worker_threads` is outside 1-16 or a
    /// configured page URL is not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if !WORKER_THREADS_RANGE.contains(&self.worker_threads) {
            return Err(Error::config(
                format!(
                    "worker_threads must be between {} and {}, got {}",
                    WORKER_THREADS_RANGE.start(),
                    WORKER_THREADS_RANGE.end(),
                    self.worker_threads
                ),
                "worker_threads",
            ));
        }

        for page_url in &self.page_urls {
            url::Url::parse(page_url).map_err(|e| {
                Error::config(format!("invalid page URL '{page_url}': {e}"), "page_urls")
            })?;
        }

        url::Url::parse(&self.catalog_base_url).map_err(|e| {
            Error::config(
                format!("invalid catalog base URL '{}': {e}", self.catalog_base_url),
                "catalog_base_url",
            )
        })?;

        Ok(())
    }
}

/// HTTP retry configuration
///
/// Retries apply only to server-side 5xx responses (500, 502, 503, 504);
/// timeouts, connection errors and 4xx responses are never retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial request (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (default: 100ms)
    #[serde(default = "default_initial_delay", with = "duration_millis")]
    pub initial_delay: Duration,

    /// Upper bound on any single backoff delay (default: 10s)
    #[serde(default = "default_max_delay", with = "duration_millis")]
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each failed attempt (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to each delay to avoid thundering herd (default: false)
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: false,
        }
    }
}

fn default_worker_threads() -> usize {
    3
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Serialize/deserialize `Duration` as integer milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
