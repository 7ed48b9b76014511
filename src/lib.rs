//! # artvee-dl
//!
//! Async scraper for the Artvee public-domain artwork catalog. Enumerates
//! catalog categories (or explicit listing URLs), walks their pagination,
//! parses artwork metadata out of listing pages, resolves per-record image
//! download links from detail pages, fetches the image bytes and hands
//! completed records to a pluggable writer.
//!
//! ## Quick start
//!
//! ```no_run
//! use artvee_dl::{ArtveeScraper, Config, MultiFileWriter};
//! use std::sync::Arc;
//!
//! # async fn example() -> artvee_dl::Result<()> {
//! let config = Config::default();
//! let writer = Arc::new(MultiFileWriter::new("./downloads", false));
//! let scraper = ArtveeScraper::new(config, writer)?;
//!
//! let stats = scraper.run().await?;
//! println!("wrote {} of {} records", stats.records_written, stats.records_parsed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! The orchestrator itself is sequential: one source at a time, one page at a
//! time. Within a page, records fan out across a semaphore-bounded worker
//! pool, and the page must fully drain before the next page is fetched. A
//! record failure never escapes its worker task; it is logged, counted and
//! the rest of the page carries on.

#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod retry;
pub mod scraper;
pub mod types;
pub mod writer;

pub use config::{Config, RetryConfig};
pub use error::{Error, Result};
pub use scraper::ArtveeScraper;
pub use types::{Artwork, Category, ImageSize, RunStats};
pub use writer::{ArtworkWriter, JsonLogWriter, MultiFileWriter};

/// Run a scraper to completion while listening for shutdown signals.
///
/// On SIGINT/SIGTERM (Ctrl+C elsewhere) the scraper stops issuing new work,
/// lets in-flight records finish and returns the stats accumulated so far.
///
/// # Errors
///
/// Propagates any error from [`ArtveeScraper::run`].
pub async fn run_with_shutdown(scraper: ArtveeScraper) -> Result<RunStats> {
    let mut run = tokio::spawn({
        let scraper = scraper.clone();
        async move { scraper.run().await }
    });

    tokio::select! {
        result = &mut run => {
            return result.map_err(|e| Error::Io(std::io::Error::other(e)))?;
        }
        _ = wait_for_signal() => {
            scraper.shutdown();
        }
    }

    run.await.map_err(|e| Error::Io(std::io::Error::other(e)))?
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("received SIGTERM"),
                _ = sigint.recv() => tracing::info!("received SIGINT"),
            }
        }
        _ => {
            tracing::warn!("could not register unix signal handlers, falling back to Ctrl+C");
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
    }
}
