//! Basic scraping example
//!
//! This example demonstrates the core functionality of artvee-dl:
//! - Building a configuration
//! - Choosing a writer
//! - Running the scraper with graceful shutdown on Ctrl+C

use artvee_dl::{ArtveeScraper, Category, Config, ImageSize, MultiFileWriter};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Scrape one category at standard resolution with three workers
    let config = Config {
        categories: vec![Category::Landscape],
        image_size: ImageSize::Standard,
        worker_threads: 3,
        ..Default::default()
    };

    // One .json metadata file and one .jpg per artwork
    let writer = Arc::new(MultiFileWriter::new("downloads", false));

    let scraper = ArtveeScraper::new(config, writer)?;

    // Runs to completion, or drains early on SIGINT/SIGTERM
    let stats = artvee_dl::run_with_shutdown(scraper).await?;

    println!(
        "processed {} pages: {} written, {} failed out of {} parsed",
        stats.pages_processed, stats.records_written, stats.records_failed, stats.records_parsed
    );

    Ok(())
}
