//! Per-record unit of work.
//!
//! A worker task resolves the download link from the record's detail page,
//! fetches the image bytes and hands the completed record to the writer.
//! Every failure mode collapses to `false`; nothing a single record does can
//! take down the page it came from or the run as a whole.

use super::ArtveeScraper;
use crate::extract;
use crate::types::Artwork;

impl ArtveeScraper {
    /// Process one record end to end. Returns whether the record was
    /// persisted by the writer.
    pub(crate) async fn process_artwork(&self, mut artwork: Artwork) -> bool {
        tracing::debug!(artwork = %artwork, "processing artwork");

        let Some(image_url) = self.image_link(&artwork.url).await else {
            return false;
        };

        match self.http.get(&image_url).await {
            Ok(resp) if resp.is_ok() => {
                artwork.image = Some(resp.body);
                self.writer.write(&artwork).await
            }
            Ok(resp) => {
                tracing::error!(
                    url = %image_url,
                    status = resp.status,
                    "failed to download artwork image"
                );
                false
            }
            Err(e) => {
                tracing::error!(url = %image_url, error = %e, "error downloading artwork image");
                false
            }
        }
    }

    /// Resolve the image download URL for the configured size tier from the
    /// record's detail page.
    async fn image_link(&self, detail_url: &str) -> Option<String> {
        tracing::debug!(url = %detail_url, "retrieving image download link");
        match self.http.get(detail_url).await {
            Ok(resp) if resp.is_ok() => {
                let prefix = self
                    .config
                    .image_url_prefix
                    .as_deref()
                    .unwrap_or_else(|| self.config.image_size.url_prefix());
                let link = extract::download_link_with_prefix(&resp.text(), prefix);
                if link.is_none() {
                    tracing::error!(
                        url = %detail_url,
                        size = %self.config.image_size,
                        "no download link for the requested image size"
                    );
                }
                link
            }
            Ok(resp) => {
                tracing::error!(
                    url = %detail_url,
                    status = resp.status,
                    "failed to retrieve detail page"
                );
                None
            }
            Err(e) => {
                tracing::error!(url = %detail_url, error = %e, "error retrieving detail page");
                None
            }
        }
    }
}
