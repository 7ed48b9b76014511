//! Run loop: source enumeration, pagination and page-level fan-out.

use super::ArtveeScraper;
use crate::error::{Error, Result};
use crate::extract;
use crate::types::{Artwork, Category, RunStats};
use tokio::task::JoinSet;

impl ArtveeScraper {
    /// Run the crawl to completion and return its summary.
    ///
    /// Explicit page URLs, when configured, take precedence and categories
    /// are not enumerated at all. Categories run in sorted order so multi-
    /// category runs are deterministic. Pages are strictly sequential: every
    /// record of a page completes before the next page is fetched, so at most
    /// one page's worth of records is ever in flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShuttingDown`] if the scraper was cancelled before
    /// the run started. Cancellation mid-run is not an error: the run stops
    /// issuing new work, drains in-flight tasks and returns the stats
    /// accumulated so far.
    pub async fn run(&self) -> Result<RunStats> {
        if self.cancel.is_cancelled() {
            return Err(Error::ShuttingDown);
        }

        let mut stats = RunStats::default();

        if self.config.page_urls.is_empty() {
            let categories = self.requested_categories();
            tracing::info!(count = categories.len(), "starting run over categories");
            for category in categories {
                if self.cancel.is_cancelled() {
                    break;
                }
                let page_count = self.num_pages_for_category(category).await;
                tracing::info!(category = %category, pages = page_count, "resolved page count");
                let label = category.label();
                for page in 1..=page_count {
                    if self.cancel.is_cancelled() {
                        break;
                    }
                    let page_url = self.category_page_url(category, page);
                    tracing::info!(category = %category, page, of = page_count, "processing listing page");
                    self.process_page(&page_url, &label, &mut stats).await;
                }
            }
        } else {
            tracing::info!(
                count = self.config.page_urls.len(),
                "starting run over explicit page URLs"
            );
            for base_url in &self.config.page_urls {
                if self.cancel.is_cancelled() {
                    break;
                }
                let page_count = self.num_pages_for_url(base_url).await;
                tracing::info!(url = %base_url, pages = page_count, "resolved page count");
                for page in 1..=page_count {
                    if self.cancel.is_cancelled() {
                        break;
                    }
                    let page_url = Self::explicit_page_url(base_url, page);
                    tracing::info!(url = %page_url, page, of = page_count, "processing listing page");
                    // Arbitrary URLs carry no category of their own
                    self.process_page(&page_url, "Unknown", &mut stats).await;
                }
            }
        }

        tracing::info!(
            pages = stats.pages_processed,
            parsed = stats.records_parsed,
            written = stats.records_written,
            failed = stats.records_failed,
            "run complete"
        );
        Ok(stats)
    }

    /// The categories this run covers, sorted and deduplicated. An empty
    /// request means all of them.
    fn requested_categories(&self) -> Vec<Category> {
        let mut categories = if self.config.categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            self.config.categories.clone()
        };
        categories.sort();
        categories.dedup();
        categories
    }

    /// Fetch one listing page, parse its records and fan them out across the
    /// worker pool, then wait for every record to finish before returning.
    async fn process_page(&self, page_url: &str, category: &str, stats: &mut RunStats) {
        let artworks = self.scrape_listing(page_url, category).await;
        stats.pages_processed += 1;
        stats.records_parsed += artworks.len() as u64;

        let mut workers = JoinSet::new();
        for artwork in artworks {
            if self.cancel.is_cancelled() {
                break;
            }
            let Ok(permit) = self.worker_limit.clone().acquire_owned().await else {
                // The semaphore is never closed; bail just in case
                break;
            };
            let scraper = self.clone();
            workers.spawn(async move {
                let _permit = permit;
                scraper.process_artwork(artwork).await
            });
        }

        while let Some(outcome) = workers.join_next().await {
            match outcome {
                Ok(true) => stats.records_written += 1,
                Ok(false) => stats.records_failed += 1,
                Err(e) => {
                    tracing::error!(error = %e, "worker task panicked");
                    stats.records_failed += 1;
                }
            }
        }
    }

    /// Fetch and parse one listing page. A page that cannot be fetched
    /// yields no records; the run carries on with the next page.
    async fn scrape_listing(&self, page_url: &str, category: &str) -> Vec<Artwork> {
        match self.http.get(page_url).await {
            Ok(resp) if resp.is_ok() => extract::parse_listing(&resp.text(), category),
            Ok(resp) => {
                tracing::error!(
                    url = %page_url,
                    status = resp.status,
                    "failed to retrieve listing page"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!(url = %page_url, error = %e, "error retrieving listing page");
                Vec::new()
            }
        }
    }
}
