//! Page-count resolution.
//!
//! Categories and explicit URLs resolve their page counts differently and,
//! deliberately, fail differently: a category that cannot report its item
//! count contributes 0 pages (a clean no-op), while an explicit URL whose
//! pagination control cannot be read still gets 1 page (the base page itself
//! is always worth fetching).

use super::ArtveeScraper;
use crate::config::ITEMS_PER_PAGE;
use crate::extract;
use crate::types::Category;

impl ArtveeScraper {
    /// Number of listing pages for a category, derived from the result-count
    /// indicator on its first page (`ceil(total / 70)`).
    pub(crate) async fn num_pages_for_category(&self, category: Category) -> u32 {
        let url = self.category_page_url(category, 1);
        match self.http.get(&url).await {
            Ok(resp) if resp.is_ok() => match extract::total_item_count(&resp.text()) {
                Some(total) => total.div_ceil(ITEMS_PER_PAGE),
                None => {
                    tracing::error!(
                        category = %category,
                        "result count indicator missing or unparsable, skipping category"
                    );
                    0
                }
            },
            Ok(resp) => {
                tracing::error!(
                    category = %category,
                    status = resp.status,
                    "failed to retrieve item count, skipping category"
                );
                0
            }
            Err(e) => {
                tracing::error!(
                    category = %category,
                    error = %e,
                    "error retrieving item count, skipping category"
                );
                0
            }
        }
    }

    /// Number of listing pages behind an explicit base URL, read from the
    /// highest number in its pagination control. A page with no control is a
    /// single page, as is any page we fail to fetch.
    pub(crate) async fn num_pages_for_url(&self, base_url: &str) -> u32 {
        match self.http.get(base_url).await {
            Ok(resp) if resp.is_ok() => extract::max_page_number(&resp.text()).unwrap_or(1),
            Ok(resp) => {
                tracing::error!(
                    url = %base_url,
                    status = resp.status,
                    "failed to retrieve pagination control, assuming a single page"
                );
                1
            }
            Err(e) => {
                tracing::error!(
                    url = %base_url,
                    error = %e,
                    "error retrieving pagination control, assuming a single page"
                );
                1
            }
        }
    }
}
