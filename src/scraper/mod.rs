//! Crawl-and-extract orchestration split into focused submodules.
//!
//! The `ArtveeScraper` struct and its methods are organized by concern:
//! - [`run`] - source enumeration, pagination loop and page-level fan-out
//! - [`pagination`] - page-count resolution per category or base URL
//! - [`worker`] - the per-record unit of work

mod pagination;
mod run;
mod worker;


use std::sync::Arc;

use crate::config::{Config, ITEMS_PER_PAGE};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::Category;
use crate::writer::ArtworkWriter;

/// Main scraper instance (cloneable - all fields are cheaply shared)
///
/// Drives the whole pipeline: enumerates categories or explicit URLs, drives
/// pagination, fans per-record work out across a bounded worker pool and
/// aggregates completion. The orchestrator itself runs single-threaded;
/// parallelism exists only at the per-record level.
#[derive(Clone)]
pub struct ArtveeScraper {
    /// Shared HTTP client; one connection pool for the whole run
    pub(crate) http: HttpClient,
    /// Destination for completed records
    pub(crate) writer: Arc<dyn ArtworkWriter>,
    /// Run configuration
    pub(crate) config: Arc<Config>,
    /// Bounds the number of concurrently executing worker tasks
    pub(crate) worker_limit: Arc<tokio::sync::Semaphore>,
    /// Observed between sources, pages and record submissions; in-flight
    /// tasks are allowed to finish after cancellation
    pub(crate) cancel: tokio_util::sync::CancellationToken,
}

impl ArtveeScraper {
    /// Create a scraper from a validated configuration and a writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for an invalid
    /// configuration, or [`Error::Network`](crate::Error::Network) if the
    /// HTTP client cannot be constructed.
    pub fn new(config: Config, writer: Arc<dyn ArtworkWriter>) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(config.retry.clone())?;
        let worker_limit = Arc::new(tokio::sync::Semaphore::new(config.worker_threads));
        Ok(Self {
            http,
            writer,
            config: Arc::new(config),
            worker_limit,
            cancel: tokio_util::sync::CancellationToken::new(),
        })
    }

    /// A handle on the run's cancellation token.
    pub fn cancel_token(&self) -> tokio_util::sync::CancellationToken {
        self.cancel.clone()
    }

    /// Request a graceful stop: no new sources, pages or records are issued;
    /// worker tasks already in flight finish and [`run`](Self::run) drains
    /// before returning.
    pub fn shutdown(&self) {
        tracing::info!("shutdown requested, no new work will be issued");
        self.cancel.cancel();
    }

    /// Listing-page URL for a category at the fixed page size.
    pub(crate) fn category_page_url(&self, category: Category, page: u32) -> String {
        format!(
            "{}/c/{}/page/{}/?per_page={}",
            self.config.catalog_base_url.trim_end_matches('/'),
            category,
            page,
            ITEMS_PER_PAGE
        )
    }

    /// Listing-page URL for an explicit base URL. Page 1 is the raw base
    /// with a trailing slash; later pages append `/page/{n}/`.
    pub(crate) fn explicit_page_url(base_url: &str, page: u32) -> String {
        let trimmed = base_url.trim_end_matches('/');
        if page == 1 {
            format!("{trimmed}/")
        } else {
            format!("{trimmed}/page/{page}/")
        }
    }
}
